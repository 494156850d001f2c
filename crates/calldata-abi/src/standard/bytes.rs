//! `bytes` (length word plus padded content) and `bytes<N>` (one word)

use calldata_primitives::{U256, WORD_SIZE};

use crate::error::{AbiError, Result};
use crate::signature::check_byte_len;
use crate::word::{
    check_length, checked_end, ensure_capacity, padded_len, read_usize, read_word, write_u256,
};

/// Encode dynamic bytes at `offset`. Empty input is rejected.
pub fn encode(data: &[u8], buf: &mut [u8], offset: usize) -> Result<usize> {
    if data.is_empty() {
        return Err(AbiError::OutOfRange("cannot encode zero-length bytes".into()));
    }
    let len = encoding_length(data.len());
    ensure_capacity(buf, offset, len)?;

    write_u256(buf, offset, U256::from(data.len()));
    let body = offset + WORD_SIZE;
    buf[body..body + data.len()].copy_from_slice(data);
    buf[body + data.len()..offset + len].fill(0);
    Ok(len)
}

/// Decode dynamic bytes at `offset`, returning the content and the padded
/// size read
pub fn decode(data: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
    let len = read_usize(data, offset)?;
    let padded = len
        .checked_next_multiple_of(WORD_SIZE)
        .ok_or_else(|| AbiError::MalformedInput(format!("byte length {len} overflows")))?;
    let body = checked_end(offset, WORD_SIZE)?;
    check_length(data, body, padded)?;
    Ok((data[body..body + len].to_vec(), WORD_SIZE + padded))
}

/// Length word plus content rounded up to whole words
pub fn encoding_length(content_len: usize) -> usize {
    WORD_SIZE + padded_len(content_len)
}

/// Encode `bytes<size>`, left-aligned and zero-padded. `data` must hold
/// exactly `size` bytes.
pub fn encode_fixed(data: &[u8], size: usize, buf: &mut [u8], offset: usize) -> Result<usize> {
    check_byte_len(size)?;
    if data.len() != size {
        return Err(AbiError::mismatch(
            format!("bytes{size}"),
            format!("{} bytes", data.len()),
        ));
    }
    ensure_capacity(buf, offset, WORD_SIZE)?;
    buf[offset..offset + size].copy_from_slice(data);
    buf[offset + size..offset + WORD_SIZE].fill(0);
    Ok(WORD_SIZE)
}

/// Decode `bytes<size>`; bytes past `size` must be zero
pub fn decode_fixed(size: usize, data: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
    check_byte_len(size)?;
    let word = read_word(data, offset)?;
    if word[size..].iter().any(|b| *b != 0) {
        return Err(AbiError::MalformedInput(format!(
            "bytes{size} at byte {offset} has non-zero padding"
        )));
    }
    Ok((word[..size].to_vec(), WORD_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_hi() {
        let mut buf = vec![0u8; encoding_length(2)];
        assert_eq!(encode(b"hi", &mut buf, 0).unwrap(), 64);
        assert_eq!(buf[31], 2);
        assert_eq!(&buf[32..34], b"hi");
        assert!(buf[34..].iter().all(|b| *b == 0));

        let (decoded, read) = decode(&buf, 0).unwrap();
        assert_eq!(decoded, b"hi");
        assert_eq!(read, 64);
    }

    #[test]
    fn test_exact_word_has_no_extra_padding() {
        assert_eq!(encoding_length(32), 64);
        assert_eq!(encoding_length(33), 96);
    }

    #[test]
    fn test_empty_rejected() {
        let mut buf = [0u8; 64];
        assert!(matches!(encode(&[], &mut buf, 0), Err(AbiError::OutOfRange(_))));
    }

    #[test]
    fn test_decode_zero_length() {
        let buf = [0u8; 32];
        assert_eq!(decode(&buf, 0).unwrap(), (Vec::new(), 32));
    }

    #[test]
    fn test_decode_length_past_end() {
        let mut buf = vec![0u8; 64];
        buf[31] = 33;
        assert!(matches!(decode(&buf, 0), Err(AbiError::MalformedInput(_))));

        let huge = [0xffu8; 32];
        assert!(matches!(decode(&huge, 0), Err(AbiError::MalformedInput(_))));
    }

    #[test]
    fn test_fixed_bytes() {
        let mut buf = [0u8; 32];
        encode_fixed(&[0xde, 0xad], 2, &mut buf, 0).unwrap();
        assert_eq!(&buf[..2], &[0xde, 0xad]);
        assert_eq!(decode_fixed(2, &buf, 0).unwrap().0, vec![0xde, 0xad]);

        assert!(matches!(
            encode_fixed(&[1, 2, 3], 2, &mut buf, 0),
            Err(AbiError::TypeMismatch { .. })
        ));
        assert!(matches!(
            decode_fixed(1, &buf, 0),
            Err(AbiError::MalformedInput(_))
        ));
    }
}
