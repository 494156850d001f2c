//! CLI error types

use calldata_abi::AbiError;
use calldata_rlp::RlpError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Codec rejected the types, values or data
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Length-prefix codec error
    #[error(transparent)]
    Rlp(#[from] RlpError),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Argument does not fit its declared type
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
