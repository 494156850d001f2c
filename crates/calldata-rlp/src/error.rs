//! Length-prefix codec errors

use rlp::DecoderError;
use thiserror::Error;

/// Length-prefix codec error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    /// Framing rejected by the `rlp` decoder
    #[error("rlp decode error: {0}")]
    Decoder(#[from] DecoderError),

    /// Bytes left over after a complete top-level item
    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),

    /// Lists nested deeper than the decoder follows
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    /// Start offset lies outside the input
    #[error("offset {offset} is past the end of a {len}-byte buffer")]
    OffsetOutOfBounds {
        /// Requested offset
        offset: usize,
        /// Input length
        len: usize,
    },

    /// Caller-supplied buffer cannot hold the encoding at the given offset
    #[error("buffer too small: need {required} bytes, have {available}")]
    BufferTooSmall {
        /// `offset + encoding length`
        required: usize,
        /// Buffer length
        available: usize,
    },
}

/// Result alias for the length-prefix codec
pub type Result<T> = std::result::Result<T, RlpError>;

impl From<RlpError> for DecoderError {
    fn from(e: RlpError) -> Self {
        match e {
            RlpError::Decoder(inner) => inner,
            RlpError::TrailingBytes(_) => DecoderError::RlpIsTooBig,
            RlpError::TooDeep(_) => DecoderError::Custom("rlp nesting too deep"),
            RlpError::OffsetOutOfBounds { .. } | RlpError::BufferTooSmall { .. } => {
                DecoderError::RlpIsTooShort
            }
        }
    }
}
