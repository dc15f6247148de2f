use std::io;
use thiserror::Error;

/// Custom error type for the wakeguard daemon
#[derive(Error, Debug)]
pub enum WakeguardError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed counter sample: {0}")]
    MalformedSample(String),

    #[error("Lease error: {0}")]
    Lease(String),

    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),
}

/// Result type alias for the wakeguard daemon
pub type Result<T> = std::result::Result<T, WakeguardError>;

impl WakeguardError {
    /// Create a malformed sample error
    pub fn malformed_sample<S: Into<String>>(msg: S) -> Self {
        WakeguardError::MalformedSample(msg.into())
    }

    /// Create a lease error
    pub fn lease<S: Into<String>>(msg: S) -> Self {
        WakeguardError::Lease(msg.into())
    }
}
