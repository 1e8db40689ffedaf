pub mod config;
pub mod dns;
pub mod error;

pub use config::CodecConfig;
pub use dns::{DNSPacket, Section, each, parse_all, parse_one, to_buffer};
pub use error::{DnsError, Result};
