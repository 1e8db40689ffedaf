pub mod constants;
pub mod edns;
pub mod enums;
pub mod header;
pub mod rdata;
pub mod reader;
pub mod record;
pub mod writer;


use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::error::{DnsError, Result};
use edns::{EdnsOpt, EdnsOption};
use enums::{DNSResourceClass, DNSResourceType};
use header::DNSHeader;
use rdata::DNSRecordData;
use reader::Reader;
use record::DNSRecord;
use writer::Writer;

/// The four record groups of a message, in wire order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Question,
    Answer,
    Authority,
    Additional,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DNSPacket {
    pub header: DNSHeader,
    pub questions: Vec<DNSRecord>,
    pub answers: Vec<DNSRecord>,
    pub authorities: Vec<DNSRecord>,
    pub additionals: Vec<DNSRecord>,
    /// EDNS0 OPT header fields, if the message carried an OPT record
    pub edns: Option<EdnsOpt>,
    /// Options from the OPT record, in wire order
    pub edns_options: Vec<EdnsOption>,
    /// Bytes left after the message when parsed with [`DNSPacket::parse`]
    pub payload: Option<Vec<u8>>,
}

impl DNSPacket {
    /// Empty packet whose header flags come from a flags word, e.g.
    /// `PacketFlag::RESPONSE | PacketFlag::AUTHORATIVE`.
    pub fn new(flags: u16) -> Self {
        Self {
            header: DNSHeader::from_flags(flags),
            ..Default::default()
        }
    }

    pub fn section(&self, section: Section) -> &[DNSRecord] {
        match section {
            Section::Question => &self.questions,
            Section::Answer => &self.answers,
            Section::Authority => &self.authorities,
            Section::Additional => &self.additionals,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<DNSRecord> {
        match section {
            Section::Question => &mut self.questions,
            Section::Answer => &mut self.answers,
            Section::Authority => &mut self.authorities,
            Section::Additional => &mut self.additionals,
        }
    }

    /// Lazily walk one section, optionally keeping only one record type.
    pub fn records(
        &self,
        section: Section,
        filter: Option<DNSResourceType>,
    ) -> impl Iterator<Item = &DNSRecord> + '_ {
        self.section(section)
            .iter()
            .filter(move |record| filter.is_none_or(|rtype| record.rtype == rtype))
    }

    /// Parse the first message in `buf`. Any bytes after it are kept in
    /// `payload` rather than interpreted.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let mut reader = Reader::from(buf);
        let mut packet = Self::read(&mut reader)?;
        if !reader.is_eof() {
            debug!(
                "{} trailing bytes after DNS message kept as payload",
                reader.remaining()
            );
            packet.payload = Some(reader.rest().to_vec());
        }
        Ok(packet)
    }

    /// Parse every message in a buffer of back-to-back messages.
    pub fn parse_all(buf: &[u8]) -> Result<Vec<Self>> {
        Self::parse_all_with(buf, &CodecConfig::default())
    }

    pub fn parse_all_with(buf: &[u8], config: &CodecConfig) -> Result<Vec<Self>> {
        let buf = Bytes::copy_from_slice(buf);
        let mut packets = Vec::new();
        let mut offset = 0;

        while offset < buf.len() {
            if packets.len() >= config.max_messages {
                return Err(DnsError::malformed_reason(format!(
                    "more than {} messages in buffer",
                    config.max_messages
                )));
            }
            // Compression offsets are relative to the start of each message
            let mut reader = Reader::new(buf.slice(offset..));
            let packet = Self::read(&mut reader)?;
            trace!(
                "Message {} spans bytes {}..{}",
                packets.len(),
                offset,
                offset + reader.tell()
            );
            offset += reader.tell();
            packets.push(packet);
        }

        if packets.is_empty() {
            return Err(DnsError::malformed_reason("empty buffer"));
        }
        Ok(packets)
    }

    /// Decode one message starting at the reader's cursor. Every failure is
    /// reported as `MalformedPacket`.
    pub fn read(reader: &mut Reader) -> Result<Self> {
        Self::read_message(reader).map_err(|e| {
            debug!("Failed to parse DNS message: {}", e);
            DnsError::malformed(e)
        })
    }

    fn read_message(reader: &mut Reader) -> Result<Self> {
        trace!("Parsing DNS message, size: {} bytes", reader.remaining());
        let header = DNSHeader::read(reader)?;
        debug!(
            "Parsed DNS header: id={}, qr={}, opcode={}, counts={}/{}/{}/{}",
            header.id,
            header.qr,
            header.opcode,
            header.qdcount,
            header.ancount,
            header.nscount,
            header.arcount
        );

        let mut packet = DNSPacket {
            header,
            ..Default::default()
        };

        for _ in 0..packet.header.qdcount {
            packet.questions.push(DNSRecord::parse_question(reader)?);
        }
        for _ in 0..packet.header.ancount {
            packet.answers.push(DNSRecord::parse(reader)?);
        }
        for _ in 0..packet.header.nscount {
            packet.authorities.push(DNSRecord::parse(reader)?);
        }
        for _ in 0..packet.header.arcount {
            let record = DNSRecord::parse(reader)?;

            // The OPT pseudo-record is metadata, not an additional record
            if record.rtype == DNSResourceType::OPT {
                let edns = EdnsOpt::from_record_fields(
                    record.raw_class(),
                    record.ttl.unwrap_or_default(),
                );
                debug!("Parsed EDNS0 record: {}", edns);
                if let DNSRecordData::Opt(options) = record.data {
                    packet.edns_options.extend(options);
                }
                packet.edns = Some(edns);
                continue;
            }

            packet.additionals.push(record);
        }

        Ok(packet)
    }

    pub fn to_buffer(&self) -> Result<Vec<u8>> {
        self.to_buffer_with(&CodecConfig::default())
    }

    /// Encode the packet. Section counts are always taken from the section
    /// lengths, never from `header`.
    pub fn to_buffer_with(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.set_compression(config.compress_names);
        self.write(&mut writer, config)?;
        Ok(writer.dump().to_vec())
    }

    pub fn write(&self, writer: &mut Writer, config: &CodecConfig) -> Result<()> {
        let opt = self.opt_record(config);

        let mut header = self.header.clone();
        header.qdcount = section_count("question", self.questions.len())?;
        header.ancount = section_count("answer", self.answers.len())?;
        header.nscount = section_count("authority", self.authorities.len())?;
        header.arcount =
            section_count("additional", self.additionals.len() + opt.is_some() as usize)?;
        header.write(writer)?;

        for question in &self.questions {
            question.write(writer, false)?;
        }
        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
            .chain(opt.as_ref())
        {
            record.write(writer, true)?;
        }

        trace!(
            "Serialized DNS message id={} into {} bytes",
            header.id,
            writer.len()
        );
        Ok(())
    }

    /// OPT record carrying `edns` and `edns_options`, when there is either.
    fn opt_record(&self, config: &CodecConfig) -> Option<DNSRecord> {
        if self.edns.is_none() && self.edns_options.is_empty() {
            return None;
        }
        let edns = self
            .edns
            .clone()
            .unwrap_or_else(|| EdnsOpt::with_payload_size(config.edns_udp_payload_size));
        let (class, ttl) = edns.to_record_fields();
        Some(DNSRecord {
            name: String::new(),
            rtype: DNSResourceType::OPT,
            rclass: DNSResourceClass::from(class),
            flush: false,
            ttl: Some(ttl),
            data: DNSRecordData::Opt(self.edns_options.clone()),
        })
    }
}

fn section_count(section: &'static str, len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| DnsError::FieldTooLong {
        field: section,
        len,
        max: u16::MAX as usize,
    })
}

/// Parse the first message in `buf`.
pub fn parse_one(buf: &[u8]) -> Result<DNSPacket> {
    DNSPacket::parse(buf)
}

/// Parse every back-to-back message in `buf`, first to last.
pub fn parse_all(buf: &[u8]) -> Result<Vec<DNSPacket>> {
    DNSPacket::parse_all(buf)
}

pub fn to_buffer(packet: &DNSPacket) -> Result<Vec<u8>> {
    packet.to_buffer()
}

/// Call `callback` for each record in `section`, optionally only those of
/// type `filter`.
pub fn each<F>(section: &[DNSRecord], filter: Option<DNSResourceType>, mut callback: F)
where
    F: FnMut(&DNSRecord),
{
    section
        .iter()
        .filter(|record| filter.is_none_or(|rtype| record.rtype == rtype))
        .for_each(|record| callback(record));
}
