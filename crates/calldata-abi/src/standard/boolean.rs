//! `bool`: 0 or 1 in one word

use calldata_primitives::{U256, WORD_SIZE};

use crate::error::{AbiError, Result};
use crate::word::{ensure_capacity, read_u256, write_u256};

/// Encode a boolean at `offset`
pub fn encode(value: bool, buf: &mut [u8], offset: usize) -> Result<usize> {
    ensure_capacity(buf, offset, WORD_SIZE)?;
    write_u256(buf, offset, U256::from(u8::from(value)));
    Ok(WORD_SIZE)
}

/// Decode a boolean; any word other than 0 or 1 is malformed
pub fn decode(data: &[u8], offset: usize) -> Result<(bool, usize)> {
    let word = read_u256(data, offset)?;
    if word.is_zero() {
        Ok((false, WORD_SIZE))
    } else if word == U256::one() {
        Ok((true, WORD_SIZE))
    } else {
        Err(AbiError::MalformedInput(format!(
            "expected bool at byte {offset}, found {word:#x}"
        )))
    }
}

/// Always one word
pub fn encoding_length() -> usize {
    WORD_SIZE
}
