//! Packed primitives: no padding, no length prefixes

use calldata_primitives::{Address, U256, WORD_SIZE};

use crate::error::{AbiError, Result};
use crate::signature::{check_bits, check_byte_len};
use crate::standard::{int, uint};
use crate::types::I256;
use crate::word::{check_length, ensure_capacity};

/// Encode the low `bits / 8` bytes of `value`
pub fn encode_uint(value: &U256, bits: usize, buf: &mut [u8], offset: usize) -> Result<usize> {
    uint::check_range(value, bits)?;
    write_low_bytes(value, bits / 8, buf, offset)
}

/// Decode a `bits / 8` byte unsigned integer
pub fn decode_uint(bits: usize, data: &[u8], offset: usize) -> Result<(U256, usize)> {
    check_bits(bits)?;
    let size = bits / 8;
    check_length(data, offset, size)?;
    Ok((U256::from_big_endian(&data[offset..offset + size]), size))
}

/// Encode a signed integer as `bits / 8` bytes of two's complement
pub fn encode_int(value: &I256, bits: usize, buf: &mut [u8], offset: usize) -> Result<usize> {
    int::check_range(value, bits)?;
    write_low_bytes(&value.to_twos_complement(), bits / 8, buf, offset)
}

/// Decode a `bits / 8` byte signed integer, sign-extending to 256 bits
pub fn decode_int(bits: usize, data: &[u8], offset: usize) -> Result<(I256, usize)> {
    check_bits(bits)?;
    let size = bits / 8;
    check_length(data, offset, size)?;
    let raw = &data[offset..offset + size];

    let fill = if raw[0] & 0x80 != 0 { 0xff } else { 0x00 };
    let mut word = [fill; WORD_SIZE];
    word[WORD_SIZE - size..].copy_from_slice(raw);
    Ok((I256::from_twos_complement(U256::from_big_endian(&word)), size))
}

/// Packed size of `int<bits>`/`uint<bits>`
pub fn int_length(bits: usize) -> usize {
    bits / 8
}

/// Encode a boolean as one byte
pub fn encode_bool(value: bool, buf: &mut [u8], offset: usize) -> Result<usize> {
    ensure_capacity(buf, offset, 1)?;
    buf[offset] = u8::from(value);
    Ok(1)
}

/// Decode a one-byte boolean
pub fn decode_bool(data: &[u8], offset: usize) -> Result<(bool, usize)> {
    check_length(data, offset, 1)?;
    match data[offset] {
        0 => Ok((false, 1)),
        1 => Ok((true, 1)),
        other => Err(AbiError::MalformedInput(format!(
            "expected bool at byte {offset}, found {other:#04x}"
        ))),
    }
}

/// Encode the 20 address bytes
pub fn encode_address(address: &Address, buf: &mut [u8], offset: usize) -> Result<usize> {
    ensure_capacity(buf, offset, Address::LEN)?;
    buf[offset..offset + Address::LEN].copy_from_slice(address.as_bytes());
    Ok(Address::LEN)
}

/// Decode 20 address bytes
pub fn decode_address(data: &[u8], offset: usize) -> Result<(Address, usize)> {
    check_length(data, offset, Address::LEN)?;
    let address = Address::from_slice(&data[offset..offset + Address::LEN])?;
    Ok((address, Address::LEN))
}

/// Encode raw content. Empty input is rejected.
pub fn encode_bytes(data: &[u8], buf: &mut [u8], offset: usize) -> Result<usize> {
    if data.is_empty() {
        return Err(AbiError::OutOfRange("cannot encode zero-length bytes".into()));
    }
    ensure_capacity(buf, offset, data.len())?;
    buf[offset..offset + data.len()].copy_from_slice(data);
    Ok(data.len())
}

/// Decode everything in `offset..end`
pub fn decode_bytes(data: &[u8], offset: usize, end: usize) -> Result<(Vec<u8>, usize)> {
    if end < offset {
        return Err(AbiError::MalformedInput(format!(
            "no room for dynamic field at byte {offset}"
        )));
    }
    check_length(data, offset, end - offset)?;
    Ok((data[offset..end].to_vec(), end - offset))
}

/// Encode exactly `size` bytes
pub fn encode_fixed_bytes(
    data: &[u8],
    size: usize,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    check_byte_len(size)?;
    if data.len() != size {
        return Err(AbiError::mismatch(
            format!("bytes{size}"),
            format!("{} bytes", data.len()),
        ));
    }
    ensure_capacity(buf, offset, size)?;
    buf[offset..offset + size].copy_from_slice(data);
    Ok(size)
}

/// Decode exactly `size` bytes
pub fn decode_fixed_bytes(size: usize, data: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
    check_byte_len(size)?;
    check_length(data, offset, size)?;
    Ok((data[offset..offset + size].to_vec(), size))
}

/// Encode UTF-8 content. Empty strings are rejected.
pub fn encode_string(value: &str, buf: &mut [u8], offset: usize) -> Result<usize> {
    if value.is_empty() {
        return Err(AbiError::OutOfRange("cannot encode empty string".into()));
    }
    encode_bytes(value.as_bytes(), buf, offset)
}

/// Decode everything in `offset..end` as UTF-8
pub fn decode_string(data: &[u8], offset: usize, end: usize) -> Result<(String, usize)> {
    let (raw, read) = decode_bytes(data, offset, end)?;
    let value = String::from_utf8(raw)
        .map_err(|e| AbiError::MalformedInput(format!("invalid UTF-8: {e}")))?;
    Ok((value, read))
}

fn write_low_bytes(value: &U256, size: usize, buf: &mut [u8], offset: usize) -> Result<usize> {
    ensure_capacity(buf, offset, size)?;
    let mut word = [0u8; WORD_SIZE];
    value.to_big_endian(&mut word);
    buf[offset..offset + size].copy_from_slice(&word[WORD_SIZE - size..]);
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_width() {
        let mut buf = [0u8; 4];
        assert_eq!(encode_uint(&U256::from(0x0102u64), 16, &mut buf, 1).unwrap(), 2);
        assert_eq!(buf, [0, 1, 2, 0]);
        assert_eq!(decode_uint(16, &buf, 1).unwrap(), (U256::from(0x0102u64), 2));
        assert!(matches!(
            encode_uint(&U256::from(256u64), 8, &mut buf, 0),
            Err(AbiError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_int_truncated_twos_complement() {
        let mut buf = [0u8; 2];
        encode_int(&I256::from(-2), 16, &mut buf, 0).unwrap();
        assert_eq!(buf, [0xff, 0xfe]);
        assert_eq!(decode_int(16, &buf, 0).unwrap(), (I256::from(-2), 2));

        encode_int(&I256::from(0x7f), 8, &mut buf, 0).unwrap();
        assert_eq!(decode_int(8, &buf, 0).unwrap().0, I256::from(127));

        let mut wide = [0u8; 32];
        encode_int(&I256::min_for_bits(256), 256, &mut wide, 0).unwrap();
        assert_eq!(decode_int(256, &wide, 0).unwrap().0, I256::min_for_bits(256));
    }

    #[test]
    fn test_bool_one_byte() {
        let mut buf = [0u8; 1];
        encode_bool(true, &mut buf, 0).unwrap();
        assert_eq!(buf, [1]);
        assert!(matches!(decode_bool(&[2], 0), Err(AbiError::MalformedInput(_))));
    }

    #[test]
    fn test_bytes_span() {
        let data = b"xxhello";
        assert_eq!(decode_bytes(data, 2, 7).unwrap(), (b"hello".to_vec(), 5));
        assert_eq!(decode_bytes(data, 7, 7).unwrap(), (Vec::new(), 0));
        assert!(matches!(decode_bytes(data, 5, 4), Err(AbiError::MalformedInput(_))));
        assert!(matches!(decode_bytes(data, 2, 9), Err(AbiError::MalformedInput(_))));
    }

    #[test]
    fn test_empty_rejected() {
        let mut buf = [0u8; 4];
        assert!(matches!(encode_bytes(&[], &mut buf, 0), Err(AbiError::OutOfRange(_))));
        assert!(matches!(encode_string("", &mut buf, 0), Err(AbiError::OutOfRange(_))));
    }
}
