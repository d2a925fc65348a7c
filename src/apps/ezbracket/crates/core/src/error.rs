//! Error types for ezbracket-core.
//!
//! The transition functions are infallible. Errors only arise at the edges,
//! when actions or snapshots are decoded from their wire form.

use thiserror::Error;

/// Core errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON action or snapshot.
    #[error("decode error: {0}")]
    Decode(String),

    /// A line of an action stream could not be decoded.
    #[error("invalid action on line {line}: {message}")]
    ActionLine { line: usize, message: String },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}
