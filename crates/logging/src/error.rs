//! crates/logging/src/error.rs
//! Error taxonomy surfaced by the facade.

use std::io;

use logging_sink::EncodingError;

use crate::resolver::ResolveError;

/// Convenience alias for results produced by the facade.
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Failures reported to callers of the facade.
///
/// Flush failures never appear here: flushing is best-effort and its errors
/// are discarded where they occur.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A verbosity or configuration spec could not be understood.
    #[error("invalid logging configuration {spec:?}: {reason}")]
    InvalidConfiguration {
        /// The rejected input.
        spec: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The resolver could not produce text for a message key.
    #[error(transparent)]
    ResourceResolution(#[from] ResolveError),

    /// Writing a record to its destination failed; the record was lost.
    #[error("failed to write log record: {0}")]
    SinkIo(#[from] io::Error),
}

impl LoggingError {
    /// Builds an [`InvalidConfiguration`](Self::InvalidConfiguration) error.
    pub fn invalid_configuration(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

impl From<EncodingError> for LoggingError {
    fn from(err: EncodingError) -> Self {
        Self::InvalidConfiguration {
            spec: err.label().to_owned(),
            reason: err.to_string(),
        }
    }
}
