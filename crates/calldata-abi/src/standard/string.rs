//! `string`: dynamic bytes over the UTF-8 text

use crate::error::{AbiError, Result};

use super::bytes;

/// Encode a string at `offset`. Empty strings are rejected.
pub fn encode(value: &str, buf: &mut [u8], offset: usize) -> Result<usize> {
    if value.is_empty() {
        return Err(AbiError::OutOfRange("cannot encode empty string".into()));
    }
    bytes::encode(value.as_bytes(), buf, offset)
}

/// Decode a string at `offset`
pub fn decode(data: &[u8], offset: usize) -> Result<(String, usize)> {
    let (raw, read) = bytes::decode(data, offset)?;
    let value = String::from_utf8(raw)
        .map_err(|e| AbiError::MalformedInput(format!("invalid UTF-8: {e}")))?;
    Ok((value, read))
}

/// Encoded size of `value`
pub fn encoding_length(value: &str) -> usize {
    bytes::encoding_length(value.len())
}
