use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DNSResourceType {
    #[default]
    A,
    NS,
    CNAME,
    SOA,
    PTR,
    MX,
    TXT,
    AAAA,
    SRV,
    OPT,
    NSEC,
    TLSA,
    ANY,
    Unknown(u16),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DNSResourceClass {
    #[default]
    IN,
    CS,
    CH,
    HS,
    NONE,
    ANY,
    Unknown(u16),
}

/// Top bit of the class field. Cache-flush on mDNS resource records,
/// unicast-response (QU) on mDNS questions.
pub const CLASS_FLUSH_BIT: u16 = 0x8000;

impl From<u16> for DNSResourceClass {
    fn from(value: u16) -> Self {
        match value {
            1 => DNSResourceClass::IN,
            2 => DNSResourceClass::CS,
            3 => DNSResourceClass::CH,
            4 => DNSResourceClass::HS,
            254 => DNSResourceClass::NONE,
            255 => DNSResourceClass::ANY,
            x => DNSResourceClass::Unknown(x),
        }
    }
}

impl From<DNSResourceClass> for u16 {
    fn from(class: DNSResourceClass) -> Self {
        match class {
            DNSResourceClass::IN => 1,
            DNSResourceClass::CS => 2,
            DNSResourceClass::CH => 3,
            DNSResourceClass::HS => 4,
            DNSResourceClass::NONE => 254,
            DNSResourceClass::ANY => 255,
            DNSResourceClass::Unknown(x) => x,
        }
    }
}

impl DNSResourceClass {
    pub fn name(&self) -> String {
        match self {
            DNSResourceClass::IN => "IN".to_string(),
            DNSResourceClass::CS => "CS".to_string(),
            DNSResourceClass::CH => "CH".to_string(),
            DNSResourceClass::HS => "HS".to_string(),
            DNSResourceClass::NONE => "NONE".to_string(),
            DNSResourceClass::ANY => "ANY".to_string(),
            DNSResourceClass::Unknown(x) => format!("CLASS{}", x),
        }
    }
}

impl From<u16> for DNSResourceType {
    fn from(value: u16) -> Self {
        match value {
            1 => DNSResourceType::A,
            2 => DNSResourceType::NS,
            5 => DNSResourceType::CNAME,
            6 => DNSResourceType::SOA,
            12 => DNSResourceType::PTR,
            15 => DNSResourceType::MX,
            16 => DNSResourceType::TXT,
            28 => DNSResourceType::AAAA,
            33 => DNSResourceType::SRV,
            41 => DNSResourceType::OPT,
            47 => DNSResourceType::NSEC,
            52 => DNSResourceType::TLSA,
            255 => DNSResourceType::ANY,
            x => DNSResourceType::Unknown(x),
        }
    }
}

impl From<DNSResourceType> for u16 {
    fn from(rtype: DNSResourceType) -> Self {
        match rtype {
            DNSResourceType::A => 1,
            DNSResourceType::NS => 2,
            DNSResourceType::CNAME => 5,
            DNSResourceType::SOA => 6,
            DNSResourceType::PTR => 12,
            DNSResourceType::MX => 15,
            DNSResourceType::TXT => 16,
            DNSResourceType::AAAA => 28,
            DNSResourceType::SRV => 33,
            DNSResourceType::OPT => 41,
            DNSResourceType::NSEC => 47,
            DNSResourceType::TLSA => 52,
            DNSResourceType::ANY => 255,
            DNSResourceType::Unknown(x) => x,
        }
    }
}

impl DNSResourceType {
    /// Mnemonic, or the RFC 3597 `TYPEnnn` form for unrecognized values.
    pub fn name(&self) -> String {
        match self {
            DNSResourceType::A => "A".to_string(),
            DNSResourceType::NS => "NS".to_string(),
            DNSResourceType::CNAME => "CNAME".to_string(),
            DNSResourceType::SOA => "SOA".to_string(),
            DNSResourceType::PTR => "PTR".to_string(),
            DNSResourceType::MX => "MX".to_string(),
            DNSResourceType::TXT => "TXT".to_string(),
            DNSResourceType::AAAA => "AAAA".to_string(),
            DNSResourceType::SRV => "SRV".to_string(),
            DNSResourceType::OPT => "OPT".to_string(),
            DNSResourceType::NSEC => "NSEC".to_string(),
            DNSResourceType::TLSA => "TLSA".to_string(),
            DNSResourceType::ANY => "ANY".to_string(),
            DNSResourceType::Unknown(x) => format!("TYPE{}", x),
        }
    }
}
