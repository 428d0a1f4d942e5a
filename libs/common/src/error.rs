//! Custom error types for the common library
//!
//! This module defines the infrastructure errors raised while configuring
//! and building the clients used by the front-end apps.

use thiserror::Error;

/// Custom error type for client infrastructure
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration could not be loaded or holds an invalid value
    #[error("Client configuration error: {0}")]
    Configuration(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Configuration(err.to_string())
    }
}

/// Type alias for Result with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
