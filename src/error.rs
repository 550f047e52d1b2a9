use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the library
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Storage error: {0}")]
    #[diagnostic(code(nightlist::storage))]
    Storage(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(nightlist::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(nightlist::config))]
    Config(String),

    #[error("Invalid date: {0}")]
    #[diagnostic(
        code(nightlist::invalid_date),
        help("dates look like \"July 15, 2025\" or \"2025-07-15T20:00:00\"")
    )]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    #[diagnostic(
        code(nightlist::invalid_time),
        help("times look like \"2:00 PM\" or \"2:00 PM - 11:00 PM\"")
    )]
    InvalidTime(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(nightlist::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(nightlist::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(nightlist::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(nightlist::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SiteResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

pub fn invalid_date(input: &str) -> Error {
    Error::InvalidDate(format!("{:?}", input))
}

pub fn invalid_time(input: &str) -> Error {
    Error::InvalidTime(format!("{:?}", input))
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
