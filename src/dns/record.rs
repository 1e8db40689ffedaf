use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{
    enums::{CLASS_FLUSH_BIT, DNSResourceClass, DNSResourceType},
    rdata::DNSRecordData,
    reader::Reader,
    writer::Writer,
};
use crate::error::{DnsError, Result};

/// TTL given to records built with [`DNSRecord::new`].
pub const DEFAULT_TTL: u32 = 3600;

/// A question, or an answer/authority/additional resource record.
///
/// Questions have no `ttl` and carry [`DNSRecordData::Empty`]. Only name,
/// type, class and `flush` of a question reach the wire, so a question
/// built with [`DNSRecord::new`] decodes back with `ttl: None`; build
/// questions with [`DNSRecord::question`] to compare them after a round
/// trip.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DNSRecord {
    pub name: String,
    pub rtype: DNSResourceType,
    pub rclass: DNSResourceClass,
    /// The top class bit: cache-flush on mDNS records, unicast-response on
    /// mDNS questions. Always false for OPT.
    pub flush: bool,
    pub ttl: Option<u32>,
    pub data: DNSRecordData,
}

impl DNSRecord {
    pub fn new(name: impl Into<String>, rtype: DNSResourceType, rclass: DNSResourceClass) -> Self {
        Self {
            name: name.into(),
            rtype,
            rclass,
            flush: false,
            ttl: Some(DEFAULT_TTL),
            data: DNSRecordData::Empty,
        }
    }

    pub fn question(
        name: impl Into<String>,
        rtype: DNSResourceType,
        rclass: DNSResourceClass,
    ) -> Self {
        Self {
            ttl: None,
            ..Self::new(name, rtype, rclass)
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_data(mut self, data: DNSRecordData) -> Self {
        self.data = data;
        self
    }

    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    pub fn is_question(&self) -> bool {
        self.ttl.is_none()
    }

    /// The domain name this record points at: the target of NS, CNAME,
    /// PTR, MX and SRV data, the primary server of SOA data, otherwise the
    /// owner name.
    pub fn as_name(&self) -> &str {
        match &self.data {
            DNSRecordData::NS(name) | DNSRecordData::CNAME(name) | DNSRecordData::PTR(name) => {
                name
            }
            DNSRecordData::MX { exchange, .. } => exchange,
            DNSRecordData::SRV(srv) => &srv.target,
            DNSRecordData::SOA(soa) => &soa.mname,
            _ => &self.name,
        }
    }

    /// RFC 2136 update records (class ANY or NONE) may carry no rdata.
    fn allows_empty_rdata(&self) -> bool {
        matches!(self.rclass, DNSResourceClass::ANY | DNSResourceClass::NONE)
    }

    pub fn type_name(&self) -> String {
        self.rtype.name()
    }

    pub fn class_name(&self) -> String {
        self.rclass.name()
    }

    pub fn flag(&self) -> u16 {
        if self.flush { CLASS_FLUSH_BIT } else { 0 }
    }

    /// The class field as it appears on the wire.
    pub fn raw_class(&self) -> u16 {
        let class = u16::from(self.rclass);
        if self.rtype == DNSResourceType::OPT {
            class
        } else {
            (class & !CLASS_FLUSH_BIT) | self.flag()
        }
    }

    /// Reads name, type and class; questions stop here.
    pub fn parse_question(reader: &mut Reader) -> Result<Self> {
        let name = reader.name()?;
        let rtype = DNSResourceType::from(reader.short()?);
        let raw_class = reader.short()?;

        let (rclass, flush) = if rtype == DNSResourceType::OPT {
            (DNSResourceClass::from(raw_class), false)
        } else {
            (
                DNSResourceClass::from(raw_class & !CLASS_FLUSH_BIT),
                raw_class & CLASS_FLUSH_BIT != 0,
            )
        };

        Ok(Self {
            name,
            rtype,
            rclass,
            flush,
            ttl: None,
            data: DNSRecordData::Empty,
        })
    }

    pub fn parse(reader: &mut Reader) -> Result<Self> {
        let start = reader.tell();
        let mut record = Self::parse_question(reader)?;
        record.ttl = Some(reader.long()?);

        let rdlength = reader.short()? as usize;
        if rdlength > reader.remaining() {
            return Err(DnsError::InvalidRdata {
                rtype: record.rtype.into(),
                reason: format!(
                    "declared length {} exceeds {} remaining bytes",
                    rdlength,
                    reader.remaining()
                ),
            });
        }
        let mut rdata = reader.slice(rdlength)?;
        record.data = if rdlength == 0 && record.allows_empty_rdata() {
            DNSRecordData::Empty
        } else {
            DNSRecordData::read(record.rtype, &mut rdata)?
        };

        trace!(
            "Parsed {} record for {} at offset {} ({} bytes rdata)",
            record.type_name(),
            record.name,
            start,
            rdlength
        );
        Ok(record)
    }

    /// Encode this record. With `with_length` the ttl and length-prefixed
    /// rdata follow; without it only the question fields are written.
    pub fn write(&self, writer: &mut Writer, with_length: bool) -> Result<()> {
        writer.name(&self.name)?;
        writer.short(self.rtype.into()).short(self.raw_class());
        if !with_length {
            return Ok(());
        }

        writer.long(self.ttl.unwrap_or(0));
        let length_at = writer.tell();
        writer.short(0);
        let rdata_start = writer.tell();
        if self.data != DNSRecordData::Empty || !self.allows_empty_rdata() {
            self.data.write(self.rtype, writer)?;
        }
        let rdata_end = writer.tell();

        let rdlength = rdata_end - rdata_start;
        if rdlength > u16::MAX as usize {
            return Err(DnsError::FieldTooLong {
                field: "rdata",
                len: rdlength,
                max: u16::MAX as usize,
            });
        }
        writer.seek(length_at)?.short(rdlength as u16);
        writer.seek(rdata_end)?;
        Ok(())
    }
}
