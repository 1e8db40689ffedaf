use serde::{Deserialize, Serialize};

/// DNS Response Code constants from RFC 1035 and subsequent RFCs
pub struct DNSRcode;

impl DNSRcode {
    pub const NOERROR: u8 = 0; // No error
    pub const FORMERR: u8 = 1; // Format error
    pub const SERVFAIL: u8 = 2; // Server failure
    pub const NXDOMAIN: u8 = 3; // Name error
    pub const NOTIMP: u8 = 4; // Not implemented
    pub const REFUSED: u8 = 5; // Query refused
    pub const YXDOMAIN: u8 = 6; // Name exists when it should not
    pub const YXRRSET: u8 = 7; // RR Set exists when it should not
    pub const NXRRSET: u8 = 8; // RR Set that should exist does not
    pub const NOTAUTH: u8 = 9; // Not authorized
    pub const NOTZONE: u8 = 10; // Name not contained in zone
}

/// Masks over the 16-bit header flags word
pub struct PacketFlag;

impl PacketFlag {
    pub const RESPONSE: u16 = 0x8000;
    pub const AUTHORATIVE: u16 = 0x0400;
    pub const TRUNCATED: u16 = 0x0200;
    pub const RECURSION: u16 = 0x0100;
}

/// DNS Opcode constants from RFC 1035
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    Query,
    IQuery,
    Status,
    Notify,
    Update,
    Dso,
    Unassigned(u8),
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        match value {
            0 => Opcode::Query,
            1 => Opcode::IQuery,
            2 => Opcode::Status,
            4 => Opcode::Notify,
            5 => Opcode::Update,
            6 => Opcode::Dso,
            x => Opcode::Unassigned(x & 0x0F),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        match opcode {
            Opcode::Query => 0,
            Opcode::IQuery => 1,
            Opcode::Status => 2,
            Opcode::Notify => 4,
            Opcode::Update => 5,
            Opcode::Dso => 6,
            Opcode::Unassigned(x) => x & 0x0F,
        }
    }
}
