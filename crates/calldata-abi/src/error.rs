//! ABI codec error types

use calldata_primitives::AddressError;
use thiserror::Error;

/// ABI codec error
///
/// Every failure is a deterministic format violation: nothing is retried and
/// no partially encoded or decoded value is ever returned alongside one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Unparseable type token or array length literal
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Recognised but disabled type (fixed-point)
    #[error("not currently supported: {0}")]
    UnsupportedType(String),

    /// Value shape does not match the declared type
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Declared type
        expected: String,
        /// Description of the supplied value
        got: String,
    },

    /// Value exceeds the declared width, or is empty where that is not allowed
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// Packed layout would not be decodable
    #[error("packing is ambiguous: {0}")]
    AmbiguousPacking(String),

    /// Decoder met bytes that no encoder would produce
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Number of arguments differs from the signature
    #[error("expected {expected} arguments, got {got}")]
    ArgumentCountMismatch {
        /// Fields in the signature
        expected: usize,
        /// Arguments supplied
        got: usize,
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

/// Result alias used across the codec
pub type Result<T> = std::result::Result<T, AbiError>;

impl AbiError {
    pub(crate) fn mismatch(expected: impl ToString, got: impl ToString) -> Self {
        AbiError::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub(crate) fn truncated(needed: usize, have: usize) -> Self {
        AbiError::MalformedInput(format!(
            "insufficient data: need {} bytes, have {}",
            needed, have
        ))
    }
}

impl From<AddressError> for AbiError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::TooLong(_) => AbiError::OutOfRange(e.to_string()),
            _ => AbiError::mismatch("address", e),
        }
    }
}
