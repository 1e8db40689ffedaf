use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use serde::{Deserialize, Serialize};

use super::{reader::Reader, writer::Writer};
use crate::error::Result;

pub const HEADER_SIZE: usize = 12;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DNSHeader {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    /// The three bits between RA and RCODE: Z, AD, CD (high to low).
    pub z: u8,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DNSHeader {
    /// Header with every flag taken from a 16-bit flags word.
    pub fn from_flags(flags: u16) -> Self {
        let mut header = DNSHeader::default();
        header.set_flags(flags);
        header
    }

    pub fn read(reader: &mut Reader) -> Result<Self> {
        let raw = reader.bytes(HEADER_SIZE)?;
        let mut bits = BitReader::<_, BigEndian>::new(&raw[..]);
        let header = DNSHeader {
            id: bits.read_var::<u16>(16)?,
            qr: bits.read_var::<u8>(1)? == 1,
            opcode: bits.read_var::<u8>(4)?,
            aa: bits.read_var::<u8>(1)? == 1,
            tc: bits.read_var::<u8>(1)? == 1,
            rd: bits.read_var::<u8>(1)? == 1,
            ra: bits.read_var::<u8>(1)? == 1,
            z: bits.read_var::<u8>(3)?,
            rcode: bits.read_var::<u8>(4)?,
            qdcount: bits.read_var::<u16>(16)?,
            ancount: bits.read_var::<u16>(16)?,
            nscount: bits.read_var::<u16>(16)?,
            arcount: bits.read_var::<u16>(16)?,
        };
        Ok(header)
    }

    pub fn write(&self, writer: &mut Writer) -> Result<()> {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        {
            let mut bits: BitWriter<&mut Vec<u8>, BigEndian> = BitWriter::new(&mut buf);
            bits.write_var::<u16>(16, self.id)?;
            bits.write_var::<u8>(1, self.qr as u8)?;
            bits.write_var::<u8>(4, self.opcode & 0x0F)?;
            bits.write_var::<u8>(1, self.aa as u8)?;
            bits.write_var::<u8>(1, self.tc as u8)?;
            bits.write_var::<u8>(1, self.rd as u8)?;
            bits.write_var::<u8>(1, self.ra as u8)?;
            bits.write_var::<u8>(3, self.z & 0x07)?;
            bits.write_var::<u8>(4, self.rcode & 0x0F)?;
            bits.write_var::<u16>(16, self.qdcount)?;
            bits.write_var::<u16>(16, self.ancount)?;
            bits.write_var::<u16>(16, self.nscount)?;
            bits.write_var::<u16>(16, self.arcount)?;
        }
        writer.buffer(&buf);
        Ok(())
    }

    /// The second header word, recomposed from the individual fields.
    pub fn flags(&self) -> u16 {
        (self.qr as u16) << 15
            | ((self.opcode & 0x0F) as u16) << 11
            | (self.aa as u16) << 10
            | (self.tc as u16) << 9
            | (self.rd as u16) << 8
            | (self.ra as u16) << 7
            | ((self.z & 0x07) as u16) << 4
            | (self.rcode & 0x0F) as u16
    }

    pub fn set_flags(&mut self, flags: u16) {
        self.qr = flags & 0x8000 != 0;
        self.opcode = ((flags >> 11) & 0x0F) as u8;
        self.aa = flags & 0x0400 != 0;
        self.tc = flags & 0x0200 != 0;
        self.rd = flags & 0x0100 != 0;
        self.ra = flags & 0x0080 != 0;
        self.z = ((flags >> 4) & 0x07) as u8;
        self.rcode = (flags & 0x0F) as u8;
    }

    /// Authentic data (RFC 4035)
    pub fn ad(&self) -> bool {
        self.z & 0b010 != 0
    }

    /// Checking disabled (RFC 4035)
    pub fn cd(&self) -> bool {
        self.z & 0b001 != 0
    }
}
