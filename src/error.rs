//! # Error Types
//!
//! This module defines error types used throughout the cleanlink library.
//!
//! Composition never fails. Errors come from the request boundary (bad mode
//! token, bad credentials) and from the device side (open, write, discovery).

use std::io;

use thiserror::Error;

use crate::mode::Mode;

/// Main error type for cleanlink operations
#[derive(Debug, Error)]
pub enum CleanlinkError {
    /// The device could not be opened (not present, busy, or no permission)
    #[error("Cannot open device {device}: {source}")]
    OpenFailed {
        device: String,
        #[source]
        source: io::Error,
    },

    /// The device was opened but the transfer failed
    #[error("Write to device {device} failed: {source}")]
    WriteFailed {
        device: String,
        #[source]
        source: io::Error,
    },

    /// A non-empty mode token that is not one of the recognized layouts
    #[error("Unknown print mode: {0:?}")]
    UnknownMode(String),

    /// The request token does not match the configured token
    #[error("Unauthorized")]
    Unauthorized,

    /// The resolved mode has no content to print for this request
    #[error("Nothing to print in {0} mode")]
    NothingToPrint(Mode),

    /// Device enumeration failed or found nothing
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// HTTP server setup or runtime error
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CleanlinkError>;

impl CleanlinkError {
    /// Wrap an open error for `device`.
    pub fn open_failed(device: &str, source: io::Error) -> Self {
        Self::OpenFailed {
            device: device.to_string(),
            source,
        }
    }

    /// Wrap a write error for `device`.
    pub fn write_failed(device: &str, source: io::Error) -> Self {
        Self::WriteFailed {
            device: device.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_failed_message() {
        let err = CleanlinkError::open_failed(
            "/dev/rfcomm0",
            io::Error::new(io::ErrorKind::NotFound, "No such file"),
        );
        assert_eq!(
            err.to_string(),
            "Cannot open device /dev/rfcomm0: No such file"
        );
    }

    #[test]
    fn test_unknown_mode_message() {
        let err = CleanlinkError::UnknownMode("banner".into());
        assert_eq!(err.to_string(), "Unknown print mode: \"banner\"");
    }

    #[test]
    fn test_nothing_to_print_names_mode() {
        let err = CleanlinkError::NothingToPrint(Mode::Label);
        assert_eq!(err.to_string(), "Nothing to print in label mode");
    }
}
