use thiserror::Error;

/// A query parameter that could not be turned into part of a filter.
///
/// Carries enough context for a client to fix the request: the parameter name,
/// the raw value it sent, and the rule that value broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for query parameter '{parameter}': {rule}")]
pub struct ValidationError {
    pub parameter: String,
    pub value: String,
    pub rule: String,
}

impl ValidationError {
    pub fn new(parameter: impl Into<String>, value: impl Into<String>, rule: impl Into<String>) -> Self {
        Self { parameter: parameter.into(), value: value.into(), rule: rule.into() }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("malformed todo document {id}: {reason}")]
    Malformed { id: String, reason: String },

    #[error("duplicate document id: {0}")]
    DuplicateId(String),

    #[error("seed error: {0}")]
    Seed(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: String, reason: String },

    #[error("logging: {0}")]
    Logging(String),
}
