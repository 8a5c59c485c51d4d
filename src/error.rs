//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Transport-level error from the OpenAQ API client (`reqwest`), including timeouts.
    #[error("API Error: {0}")]
    Api(Arc<reqwest::Error>),

    /// Error during JSON parsing (`serde_json`).
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// The upstream service answered, but not with something usable.
    #[error("Upstream Error: {0}")]
    Upstream(String),

    /// Error related to standard I/O operations (binding the listener, log files).
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// The requested country or city exists in neither data source.
    #[error("{0}")]
    NotFound(String),

    /// The request could not be parsed, e.g. a required query parameter is missing.
    #[error("{0}")]
    BadRequest(String),

    /// A request parameter was outside its accepted range.
    #[error("{0}")]
    InvalidParameter(String),

    /// Invalid startup configuration.
    #[error("Configuration Error: {0}")]
    Config(String),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}
