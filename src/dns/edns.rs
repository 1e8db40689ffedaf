use serde::{Deserialize, Serialize};

use super::{reader::Reader, writer::Writer};
use crate::error::{DnsError, Result};

/// EDNS0 OPT pseudo-record header fields
/// RFC 6891: https://tools.ietf.org/html/rfc6891
///
/// The options themselves are carried on the packet as `edns_options`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdnsOpt {
    /// UDP payload size that can be handled by the requestor
    pub udp_payload_size: u16,
    /// Extended RCODE (high 8 bits)
    pub extended_rcode: u8,
    /// EDNS version (currently 0)
    pub version: u8,
    /// EDNS flags (16 bits)
    pub flags: u16,
}

/// EDNS option structure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdnsOption {
    /// Option code (2 bytes)
    pub code: u16,
    /// Option data
    pub data: Vec<u8>,
}

/// Common EDNS option codes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdnsOptionCode {
    /// Name Server Identifier (RFC 5001)
    Nsid,
    /// Client Subnet (RFC 7871)
    ClientSubnet,
    /// DNS Cookies (RFC 7873)
    Cookie,
    /// TCP Keepalive (RFC 7828)
    TcpKeepalive,
    /// Padding (RFC 7830)
    Padding,
    Unknown(u16),
}

impl From<u16> for EdnsOptionCode {
    fn from(value: u16) -> Self {
        match value {
            3 => EdnsOptionCode::Nsid,
            8 => EdnsOptionCode::ClientSubnet,
            10 => EdnsOptionCode::Cookie,
            11 => EdnsOptionCode::TcpKeepalive,
            12 => EdnsOptionCode::Padding,
            x => EdnsOptionCode::Unknown(x),
        }
    }
}

impl From<EdnsOptionCode> for u16 {
    fn from(code: EdnsOptionCode) -> Self {
        match code {
            EdnsOptionCode::Nsid => 3,
            EdnsOptionCode::ClientSubnet => 8,
            EdnsOptionCode::Cookie => 10,
            EdnsOptionCode::TcpKeepalive => 11,
            EdnsOptionCode::Padding => 12,
            EdnsOptionCode::Unknown(x) => x,
        }
    }
}

impl Default for EdnsOpt {
    fn default() -> Self {
        Self::with_payload_size(4096)
    }
}

impl EdnsOpt {
    /// Create an EDNS OPT header with specified UDP payload size
    pub fn with_payload_size(payload_size: u16) -> Self {
        Self {
            udp_payload_size: payload_size,
            extended_rcode: 0,
            version: 0,
            flags: 0,
        }
    }

    /// Check if DNSSEC OK (DO) flag is set
    pub fn do_flag(&self) -> bool {
        (self.flags & 0x8000) != 0
    }

    /// Set the DNSSEC OK (DO) flag
    pub fn set_do_flag(&mut self, value: bool) {
        if value {
            self.flags |= 0x8000;
        } else {
            self.flags &= !0x8000;
        }
    }

    /// Decode the header from the OPT record's CLASS and TTL fields:
    /// - CLASS: UDP payload size (16 bits)
    /// - TTL: Extended RCODE (8 bits) | Version (8 bits) | Flags (16 bits)
    pub fn from_record_fields(class: u16, ttl: u32) -> Self {
        Self {
            udp_payload_size: class,
            extended_rcode: ((ttl >> 24) & 0xFF) as u8,
            version: ((ttl >> 16) & 0xFF) as u8,
            flags: (ttl & 0xFFFF) as u16,
        }
    }

    /// Inverse of [`EdnsOpt::from_record_fields`], returns `(class, ttl)`.
    pub fn to_record_fields(&self) -> (u16, u32) {
        let ttl = ((self.extended_rcode as u32) << 24)
            | ((self.version as u32) << 16)
            | (self.flags as u32);
        (self.udp_payload_size, ttl)
    }

    /// Get a debug string representation
    pub fn debug_info(&self) -> String {
        format!(
            "EDNS{}: payload_size={}, flags=0x{:04x}{}",
            self.version,
            self.udp_payload_size,
            self.flags,
            if self.do_flag() { " (DO)" } else { "" },
        )
    }
}

impl std::fmt::Display for EdnsOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.debug_info())
    }
}

impl EdnsOption {
    pub fn new(code: impl Into<u16>, data: Vec<u8>) -> Self {
        Self {
            code: code.into(),
            data,
        }
    }

    pub fn kind(&self) -> EdnsOptionCode {
        self.code.into()
    }

    /// Parse every (code, length, data) triple in an OPT rdata view.
    pub fn read_all(rdata: &mut Reader) -> Result<Vec<EdnsOption>> {
        let mut options = Vec::new();
        while !rdata.is_eof() {
            if rdata.remaining() < 4 {
                return Err(DnsError::InvalidRdata {
                    rtype: 41,
                    reason: format!("{} stray bytes after last option", rdata.remaining()),
                });
            }
            let code = rdata.short()?;
            let length = rdata.short()? as usize;
            let data = rdata.bytes(length)?.to_vec();
            options.push(EdnsOption { code, data });
        }
        Ok(options)
    }

    pub fn write_all(options: &[EdnsOption], writer: &mut Writer) -> Result<()> {
        for option in options {
            if option.data.len() > u16::MAX as usize {
                return Err(DnsError::FieldTooLong {
                    field: "EDNS option data",
                    len: option.data.len(),
                    max: u16::MAX as usize,
                });
            }
            writer
                .short(option.code)
                .short(option.data.len() as u16)
                .buffer(&option.data);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_flag() {
        let mut opt = EdnsOpt::default();
        assert_eq!(opt.udp_payload_size, 4096);
        assert!(!opt.do_flag());

        opt.set_do_flag(true);
        assert!(opt.do_flag());
        assert_eq!(opt.flags & 0x8000, 0x8000);

        opt.set_do_flag(false);
        assert!(!opt.do_flag());
    }

    #[test]
    fn test_record_field_conversion() {
        let mut opt = EdnsOpt::with_payload_size(1232);
        opt.set_do_flag(true);
        opt.extended_rcode = 1;

        let (class, ttl) = opt.to_record_fields();
        assert_eq!(class, 1232);
        assert_eq!(ttl, 0x0100_8000);
        assert_eq!(EdnsOpt::from_record_fields(class, ttl), opt);
    }

    #[test]
    fn test_option_triples() {
        let options = vec![
            EdnsOption::new(EdnsOptionCode::Nsid, vec![]),
            EdnsOption::new(EdnsOptionCode::Cookie, vec![1, 2, 3, 4, 5, 6, 7, 8]),
        ];
        let mut writer = Writer::new();
        EdnsOption::write_all(&options, &mut writer).unwrap();
        let bytes = writer.dump();
        assert_eq!(&bytes[..4], &[0x00, 0x03, 0x00, 0x00]);

        let mut reader = Reader::new(bytes);
        let parsed = EdnsOption::read_all(&mut reader).unwrap();
        assert_eq!(parsed, options);
        assert_eq!(parsed[1].kind(), EdnsOptionCode::Cookie);
    }

    #[test]
    fn test_truncated_option() {
        let mut reader = Reader::new(vec![0x00, 0x0A, 0x00, 0x08, 0x01]);
        assert!(matches!(
            EdnsOption::read_all(&mut reader),
            Err(DnsError::Truncated { .. })
        ));

        let mut reader = Reader::new(vec![0x00, 0x0A]);
        assert!(matches!(
            EdnsOption::read_all(&mut reader),
            Err(DnsError::InvalidRdata { rtype: 41, .. })
        ));
    }
}
