//! Bounds-checked access to 32-byte words

use calldata_primitives::{U256, WORD_SIZE};

use crate::error::{AbiError, Result};

/// Round `len` up to the next multiple of the word size
pub(crate) fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// `offset + len`, failing instead of wrapping
pub(crate) fn checked_end(offset: usize, len: usize) -> Result<usize> {
    offset
        .checked_add(len)
        .ok_or_else(|| AbiError::MalformedInput(format!("offset {offset} + {len} overflows")))
}

/// Check that `data` holds `len` bytes starting at `offset`
pub(crate) fn check_length(data: &[u8], offset: usize, len: usize) -> Result<()> {
    let end = checked_end(offset, len)?;
    if data.len() < end {
        return Err(AbiError::truncated(end, data.len()));
    }
    Ok(())
}

/// Check that an encoder may write `len` bytes at `offset`
pub(crate) fn ensure_capacity(buf: &[u8], offset: usize, len: usize) -> Result<()> {
    let required = offset.saturating_add(len);
    if buf.len() < required {
        return Err(AbiError::BufferTooSmall {
            required,
            available: buf.len(),
        });
    }
    Ok(())
}

/// Read the word at `offset`
pub(crate) fn read_word(data: &[u8], offset: usize) -> Result<&[u8]> {
    check_length(data, offset, WORD_SIZE)?;
    Ok(&data[offset..offset + WORD_SIZE])
}

/// Read the word at `offset` as a big-endian integer
pub(crate) fn read_u256(data: &[u8], offset: usize) -> Result<U256> {
    Ok(U256::from_big_endian(read_word(data, offset)?))
}

/// Read a length or offset word, rejecting values that cannot index memory
pub(crate) fn read_usize(data: &[u8], offset: usize) -> Result<usize> {
    let value = read_u256(data, offset)?;
    if value > U256::from(usize::MAX) {
        return Err(AbiError::MalformedInput(format!(
            "length or offset {value} at byte {offset} is out of range"
        )));
    }
    Ok(value.as_usize())
}

/// Write `value` as a big-endian word. Capacity must already be checked.
pub(crate) fn write_u256(buf: &mut [u8], offset: usize, value: U256) {
    value.to_big_endian(&mut buf[offset..offset + WORD_SIZE]);
}
