//! Error types for the msword2image library.
//!
//! Every fallible operation returns `Result<T, MsWordToImageError>`. The
//! variants fall into three groups:
//!
//! * **Configuration** — raised synchronously before any network call
//!   (input or output unset, unsupported pairing, bad endpoint).
//! * **Input** — the local Word document cannot be used (missing,
//!   unreadable). Also raised before any network call.
//! * **Transport / output** — the remote service answered with an error
//!   status, the connection failed, or the result could not be written.
//!
//! Request targets embedded in errors are always redacted with
//! [`crate::endpoint::redact`] so the API key never leaks into logs.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the msword2image library.
#[derive(Debug, Error)]
pub enum MsWordToImageError {
    // ── Configuration errors ──────────────────────────────────────────────
    /// Input or output unset, unsupported kind pairing, or an invalid
    /// client setting.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input document was not found at the given path.
    #[error("Input file was not found at '{path}'\nCheck the path exists and is a regular file.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the input document.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Input document exists but reading it failed.
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The conversion service answered with a non-success HTTP status.
    #[error("Conversion service returned HTTP {status} for '{target}'")]
    TransportFailure { status: u16, target: String },

    /// The request could not be sent or the response could not be read.
    #[error("Request to '{target}' failed: {source}")]
    RequestFailed {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request to '{target}' timed out after {secs}s\nIncrease the timeout with --timeout.")]
    Timeout { target: String, secs: u64 },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output image file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or read the scratch file used for base64 output.
    #[error("Temporary file error: {0}")]
    TempFile(#[source] std::io::Error),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MsWordToImageError {
    /// HTTP status carried by a [`MsWordToImageError::TransportFailure`].
    pub fn status(&self) -> Option<u16> {
        match self {
            MsWordToImageError::TransportFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}
