//! `uint<N>`: magnitude right-aligned in one word

use calldata_primitives::{U256, WORD_SIZE};

use crate::error::{AbiError, Result};
use crate::signature::check_bits;
use crate::word::{ensure_capacity, read_u256, write_u256};

/// Encode `value` as `uint<bits>` at `offset`
pub fn encode(value: &U256, bits: usize, buf: &mut [u8], offset: usize) -> Result<usize> {
    check_range(value, bits)?;
    ensure_capacity(buf, offset, WORD_SIZE)?;
    write_u256(buf, offset, *value);
    Ok(WORD_SIZE)
}

/// Decode a `uint<bits>` word at `offset`
pub fn decode(bits: usize, data: &[u8], offset: usize) -> Result<(U256, usize)> {
    check_bits(bits)?;
    let value = read_u256(data, offset)?;
    if !fits_bits(&value, bits) {
        return Err(AbiError::MalformedInput(format!(
            "word at byte {offset} exceeds uint{bits}"
        )));
    }
    Ok((value, WORD_SIZE))
}

/// Always one word
pub fn encoding_length() -> usize {
    WORD_SIZE
}

/// Whether `value < 2^bits`
pub(crate) fn fits_bits(value: &U256, bits: usize) -> bool {
    value.bits() <= bits
}

pub(crate) fn check_range(value: &U256, bits: usize) -> Result<()> {
    check_bits(bits)?;
    if fits_bits(value, bits) {
        Ok(())
    } else {
        Err(AbiError::OutOfRange(format!("{value} does not fit in uint{bits}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_one() {
        let mut buf = [0u8; 32];
        assert_eq!(encode(&U256::one(), 256, &mut buf, 0).unwrap(), 32);
        assert!(buf[..31].iter().all(|b| *b == 0));
        assert_eq!(buf[31], 1);
    }

    #[test]
    fn test_range_per_width() {
        let mut buf = [0u8; 32];
        for bits in (8..256).step_by(8) {
            let max = (U256::one() << bits) - U256::one();
            assert!(encode(&max, bits, &mut buf, 0).is_ok());
            assert!(matches!(
                encode(&(U256::one() << bits), bits, &mut buf, 0),
                Err(AbiError::OutOfRange(_))
            ));
        }
        assert!(encode(&U256::MAX, 256, &mut buf, 0).is_ok());
    }

    #[test]
    fn test_decode_rejects_wide_word() {
        let mut word = [0u8; 32];
        word[30] = 1;
        assert_eq!(decode(16, &word, 0).unwrap(), (U256::from(256u64), 32));
        assert!(matches!(decode(8, &word, 0), Err(AbiError::MalformedInput(_))));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 40];
        assert!(matches!(
            encode(&U256::one(), 256, &mut buf, 9),
            Err(AbiError::BufferTooSmall { required: 41, available: 40 })
        ));
    }
}
