use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Compress names with back-references when encoding
    pub compress_names: bool,

    /// Maximum number of concatenated messages accepted by a single parse
    pub max_messages: usize,

    /// UDP payload size advertised by a synthesized OPT record when the
    /// packet carries EDNS options but no EDNS header info
    pub edns_udp_payload_size: u16,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compress_names: true,
            max_messages: 64,
            edns_udp_payload_size: 4096,
        }
    }
}

impl CodecConfig {
    /// Create a CodecConfig from environment variables
    /// Returns Err if a variable is present but invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(compress) = std::env::var("DNSCODEC_COMPRESS_NAMES") {
            config.compress_names = parse_bool(&compress, true);
        }

        if let Ok(max_messages) = std::env::var("DNSCODEC_MAX_MESSAGES") {
            config.max_messages = max_messages
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMaxMessages(max_messages.clone()))?;
        }

        if let Ok(payload_size) = std::env::var("DNSCODEC_EDNS_PAYLOAD_SIZE") {
            config.edns_udp_payload_size = payload_size
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPayloadSize(payload_size.clone()))?;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_messages == 0 {
            return Err(ConfigError::InvalidMaxMessages(
                "Max messages must be greater than 0".to_string(),
            ));
        }

        // RFC 6891: values below 512 are treated as 512
        if self.edns_udp_payload_size < 512 {
            return Err(ConfigError::InvalidPayloadSize(format!(
                "{} is below the 512 byte minimum",
                self.edns_udp_payload_size
            )));
        }

        Ok(())
    }
}

/// Parse a boolean from a string, with a default value for invalid input
fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => default,
    }
}
