//! Error types for acceleration-structure configuration.

use thiserror::Error;

/// Errors that can occur while loading or validating [`Features`](crate::Features).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid TOML for [`Features`](crate::Features).
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting is out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
