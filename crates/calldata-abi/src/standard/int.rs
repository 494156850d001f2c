//! `int<N>`: full 256-bit two's complement in one word

use calldata_primitives::WORD_SIZE;

use crate::error::{AbiError, Result};
use crate::signature::check_bits;
use crate::types::I256;
use crate::word::{ensure_capacity, read_u256, write_u256};

/// Encode `value` as `int<bits>` at `offset`.
///
/// Negative values are written as `2^256 + value` whatever the width.
pub fn encode(value: &I256, bits: usize, buf: &mut [u8], offset: usize) -> Result<usize> {
    check_range(value, bits)?;
    ensure_capacity(buf, offset, WORD_SIZE)?;
    write_u256(buf, offset, value.to_twos_complement());
    Ok(WORD_SIZE)
}

/// Decode an `int<bits>` word at `offset`
pub fn decode(bits: usize, data: &[u8], offset: usize) -> Result<(I256, usize)> {
    check_bits(bits)?;
    let value = I256::from_twos_complement(read_u256(data, offset)?);
    if !value.fits_bits(bits) {
        return Err(AbiError::MalformedInput(format!(
            "word at byte {offset} exceeds int{bits}"
        )));
    }
    Ok((value, WORD_SIZE))
}

/// Always one word
pub fn encoding_length() -> usize {
    WORD_SIZE
}

pub(crate) fn check_range(value: &I256, bits: usize) -> Result<()> {
    check_bits(bits)?;
    if value.fits_bits(bits) {
        Ok(())
    } else {
        Err(AbiError::OutOfRange(format!("{value} does not fit in int{bits}")))
    }
}
