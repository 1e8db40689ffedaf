use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("Buffer truncated at offset {offset}: need {need} bytes, have {have} bytes")]
    Truncated {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("Position {pos} out of bounds for buffer of {len} bytes")]
    OutOfBounds { pos: usize, len: usize },

    #[error("Malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: &'static str },

    #[error("Invalid rdata for type {rtype}: {reason}")]
    InvalidRdata { rtype: u16, reason: String },

    /// Raised at the packet boundary for any decode failure. Callers should
    /// drop the datagram.
    #[error("Malformed packet: {reason}")]
    MalformedPacket {
        reason: String,
        #[source]
        cause: Option<Box<DnsError>>,
    },

    #[error("DNS name too long: {0}")]
    NameTooLong(String),

    #[error("Invalid DNS label in name: {0}")]
    InvalidLabel(String),

    #[error("Field {field} too long: {len} exceeds maximum of {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Record data does not match record type {rtype}")]
    RdataMismatch { rtype: u16 },

    #[error("Invalid bit stream: {0}")]
    InvalidBitStream(String),
}

impl From<std::io::Error> for DnsError {
    fn from(e: std::io::Error) -> Self {
        DnsError::InvalidBitStream(e.to_string())
    }
}

impl DnsError {
    /// Wrap `cause` as a [`DnsError::MalformedPacket`]. Already-wrapped errors
    /// are returned unchanged.
    pub fn malformed(cause: DnsError) -> Self {
        match cause {
            DnsError::MalformedPacket { .. } => cause,
            other => DnsError::MalformedPacket {
                reason: other.to_string(),
                cause: Some(Box::new(other)),
            },
        }
    }

    pub fn malformed_reason(reason: impl Into<String>) -> Self {
        DnsError::MalformedPacket {
            reason: reason.into(),
            cause: None,
        }
    }

    pub fn is_malformed_packet(&self) -> bool {
        matches!(self, DnsError::MalformedPacket { .. })
    }

    /// The lower-level error wrapped by a `MalformedPacket`, if any.
    pub fn cause(&self) -> Option<&DnsError> {
        match self {
            DnsError::MalformedPacket { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid max messages: {0}")]
    InvalidMaxMessages(String),

    #[error("Invalid EDNS payload size: {0}")]
    InvalidPayloadSize(String),
}

pub type Result<T> = std::result::Result<T, DnsError>;
