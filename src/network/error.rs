use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by a node data source.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Request to '{endpoint}' failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Node returned {status} for '{endpoint}': {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Failed to decode response from '{endpoint}': {message}")]
    Decode { endpoint: String, message: String },

    #[error("Failed to read credentials '{path}': {source}")]
    Credentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TLS certificate '{path}': {message}")]
    InvalidCertificate { path: PathBuf, message: String },

    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: &'static str, seconds: u64 },

    #[error("Data source unavailable: {message}")]
    Unavailable { message: String },
}
