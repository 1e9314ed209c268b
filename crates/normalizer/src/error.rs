use thiserror::Error;

/// Result type for configuration handling
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating normalizer configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Neither valid JSON nor valid TOML, or wrong field types
    #[error("Config parse error: {0}")]
    ParseError(String),

    /// Fields that do not exist in the schema, as dotted paths
    #[error("Unknown config fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    /// Semantically invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConfigError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
