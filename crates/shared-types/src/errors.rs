//! # Error Types
//!
//! Errors raised while encoding or decoding wire types.

use thiserror::Error;

/// Errors that can occur when converting wire types to and from bytes or text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Text was not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes had the wrong length for the target type.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Binary encoding failed.
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Binary decoding failed.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// An IDL document could not be parsed or rendered.
    #[error("Invalid IDL: {0}")]
    InvalidIdl(String),
}

impl From<hex::FromHexError> for WireError {
    fn from(e: hex::FromHexError) -> Self {
        WireError::InvalidHex(e.to_string())
    }
}
