use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use super::{edns::EdnsOption, enums::DNSResourceType, reader::Reader, writer::Writer};
use crate::error::{DnsError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvData {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
}

/// Decoded payload of a record, keyed by record type.
///
/// `Raw` carries the rdata of every type without a structured decoder so
/// it survives a decode/encode cycle byte for byte.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DNSRecordData {
    /// Questions, and RFC 2136 update records (class ANY or NONE) with a
    /// zero rdata length
    #[default]
    Empty,
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(String),
    CNAME(String),
    PTR(String),
    SOA(SoaData),
    MX { preference: u16, exchange: String },
    SRV(SrvData),
    TXT(Vec<Vec<u8>>),
    /// Only seen transiently; the packet moves these into `edns_options`
    Opt(Vec<EdnsOption>),
    Raw(Vec<u8>),
}

impl DNSRecordData {
    /// Decode the rdata view of a record of type `rtype`. The view must be
    /// consumed exactly; an empty view is short for every fixed-shape type.
    pub fn read(rtype: DNSResourceType, rdata: &mut Reader) -> Result<Self> {
        let data = match rtype {
            DNSResourceType::A => DNSRecordData::A(Ipv4Addr::from(rdata.array::<4>()?)),
            DNSResourceType::AAAA => DNSRecordData::AAAA(Ipv6Addr::from(rdata.array::<16>()?)),
            DNSResourceType::NS => DNSRecordData::NS(rdata.name()?),
            DNSResourceType::CNAME => DNSRecordData::CNAME(rdata.name()?),
            DNSResourceType::PTR => DNSRecordData::PTR(rdata.name()?),
            DNSResourceType::SOA => DNSRecordData::SOA(SoaData {
                mname: rdata.name()?,
                rname: rdata.name()?,
                serial: rdata.long()?,
                refresh: rdata.long()?,
                retry: rdata.long()?,
                expire: rdata.long()?,
                minimum: rdata.long()?,
            }),
            DNSResourceType::MX => DNSRecordData::MX {
                preference: rdata.short()?,
                exchange: rdata.name()?,
            },
            DNSResourceType::SRV => DNSRecordData::SRV(SrvData {
                priority: rdata.short()?,
                weight: rdata.short()?,
                port: rdata.short()?,
                target: rdata.name()?,
            }),
            DNSResourceType::TXT => {
                let mut strings = Vec::new();
                while !rdata.is_eof() {
                    let len = rdata.byte()? as usize;
                    strings.push(rdata.bytes(len)?.to_vec());
                }
                DNSRecordData::TXT(strings)
            }
            DNSResourceType::OPT => DNSRecordData::Opt(EdnsOption::read_all(rdata)?),
            DNSResourceType::NSEC
            | DNSResourceType::TLSA
            | DNSResourceType::ANY
            | DNSResourceType::Unknown(_) => DNSRecordData::Raw(rdata.rest().to_vec()),
        };

        if !rdata.is_eof() {
            return Err(DnsError::InvalidRdata {
                rtype: rtype.into(),
                reason: format!("{} trailing bytes", rdata.remaining()),
            });
        }
        Ok(data)
    }

    pub fn write(&self, rtype: DNSResourceType, writer: &mut Writer) -> Result<()> {
        if !self.matches(rtype) {
            return Err(DnsError::RdataMismatch {
                rtype: rtype.into(),
            });
        }

        match self {
            DNSRecordData::Empty => {}
            DNSRecordData::A(addr) => {
                writer.buffer(&addr.octets());
            }
            DNSRecordData::AAAA(addr) => {
                writer.buffer(&addr.octets());
            }
            DNSRecordData::NS(name) | DNSRecordData::CNAME(name) | DNSRecordData::PTR(name) => {
                writer.name(name)?;
            }
            DNSRecordData::SOA(soa) => {
                writer.name(&soa.mname)?.name(&soa.rname)?;
                writer
                    .long(soa.serial)
                    .long(soa.refresh)
                    .long(soa.retry)
                    .long(soa.expire)
                    .long(soa.minimum);
            }
            DNSRecordData::MX {
                preference,
                exchange,
            } => {
                writer.short(*preference).name(exchange)?;
            }
            DNSRecordData::SRV(srv) => {
                writer.short(srv.priority).short(srv.weight).short(srv.port);
                // RFC 2782: the target is never compressed
                let compress = writer.compression();
                writer.set_compression(false);
                let written = writer.name(&srv.target).map(|_| ());
                writer.set_compression(compress);
                written?;
            }
            DNSRecordData::TXT(strings) => {
                for string in strings {
                    if string.len() > u8::MAX as usize {
                        return Err(DnsError::FieldTooLong {
                            field: "TXT character string",
                            len: string.len(),
                            max: u8::MAX as usize,
                        });
                    }
                    writer.byte(string.len() as u8).buffer(string);
                }
            }
            DNSRecordData::Opt(options) => EdnsOption::write_all(options, writer)?,
            DNSRecordData::Raw(bytes) => {
                writer.buffer(bytes);
            }
        }
        Ok(())
    }

    /// Whether this payload shape may be written under `rtype` and read back.
    pub fn matches(&self, rtype: DNSResourceType) -> bool {
        match (self, rtype) {
            (DNSRecordData::Empty, rtype) => !has_fixed_shape(rtype),
            // Raw bytes must decode on their own under `rtype`
            (DNSRecordData::Raw(bytes), rtype) => {
                DNSRecordData::read(rtype, &mut Reader::from(bytes.as_slice())).is_ok()
            }
            (DNSRecordData::A(_), DNSResourceType::A)
            | (DNSRecordData::AAAA(_), DNSResourceType::AAAA)
            | (DNSRecordData::NS(_), DNSResourceType::NS)
            | (DNSRecordData::CNAME(_), DNSResourceType::CNAME)
            | (DNSRecordData::PTR(_), DNSResourceType::PTR)
            | (DNSRecordData::SOA(_), DNSResourceType::SOA)
            | (DNSRecordData::MX { .. }, DNSResourceType::MX)
            | (DNSRecordData::SRV(_), DNSResourceType::SRV)
            | (DNSRecordData::TXT(_), DNSResourceType::TXT)
            | (DNSRecordData::Opt(_), DNSResourceType::OPT) => true,
            _ => false,
        }
    }
}

/// Types whose rdata cannot be empty. TXT and OPT are sequences, the rest
/// are opaque.
fn has_fixed_shape(rtype: DNSResourceType) -> bool {
    matches!(
        rtype,
        DNSResourceType::A
            | DNSResourceType::AAAA
            | DNSResourceType::NS
            | DNSResourceType::CNAME
            | DNSResourceType::PTR
            | DNSResourceType::SOA
            | DNSResourceType::MX
            | DNSResourceType::SRV
    )
}

impl fmt::Display for DNSRecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DNSRecordData::Empty => Ok(()),
            DNSRecordData::A(addr) => write!(f, "{}", addr),
            DNSRecordData::AAAA(addr) => write!(f, "{}", addr),
            DNSRecordData::NS(name) | DNSRecordData::CNAME(name) | DNSRecordData::PTR(name) => {
                write!(f, "{}", name)
            }
            DNSRecordData::SOA(soa) => write!(
                f,
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ),
            DNSRecordData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            DNSRecordData::SRV(srv) => write!(
                f,
                "{} {} {} {}",
                srv.priority, srv.weight, srv.port, srv.target
            ),
            DNSRecordData::TXT(strings) => {
                let quoted: Vec<String> = strings
                    .iter()
                    .map(|s| format!("\"{}\"", String::from_utf8_lossy(s)))
                    .collect();
                write!(f, "{}", quoted.join(" "))
            }
            DNSRecordData::Opt(options) => write!(f, "{} options", options.len()),
            // RFC 3597 generic rdata
            DNSRecordData::Raw(bytes) => {
                write!(f, "\\# {}", bytes.len())?;
                if !bytes.is_empty() {
                    write!(f, " ")?;
                    for b in bytes {
                        write!(f, "{:02x}", b)?;
                    }
                }
                Ok(())
            }
        }
    }
}
