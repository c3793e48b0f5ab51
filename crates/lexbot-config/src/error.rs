//! Error type shared by every part of the crate.

use thiserror::Error;

/// Errors raised while validating, resolving, or loading bot configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// Name of the offending field, spelled as in the record it came from:
        /// camelCase for [`LexDefaults`](crate::LexDefaults), snake_case for
        /// [`BotOverrides`](crate::BotOverrides)
        field: String,
        /// Why the value was rejected
        value: String,
    },

    /// Engine name is not one the voice platform supports
    #[error("unknown voice engine '{0}' (expected 'standard' or 'neural')")]
    UnknownEngine(String),

    /// The same locale id appears twice in one bot
    #[error("locale '{0}' is configured more than once")]
    DuplicateLocale(String),

    /// Override file extension has no matching parser
    #[error("unsupported override file format: {0}")]
    UnsupportedFormat(String),

    /// I/O error while reading an override file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[cfg(feature = "yaml")]
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
