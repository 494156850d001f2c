//! `address`: 20 bytes right-aligned in one word

use calldata_primitives::{Address, WORD_SIZE};

use crate::error::{AbiError, Result};
use crate::word::{ensure_capacity, read_word};

const PADDING: usize = WORD_SIZE - Address::LEN;

/// Encode an address at `offset`
pub fn encode(address: &Address, buf: &mut [u8], offset: usize) -> Result<usize> {
    ensure_capacity(buf, offset, WORD_SIZE)?;
    buf[offset..offset + PADDING].fill(0);
    buf[offset + PADDING..offset + WORD_SIZE].copy_from_slice(address.as_bytes());
    Ok(WORD_SIZE)
}

/// Decode an address; the 12 padding bytes must be zero
pub fn decode(data: &[u8], offset: usize) -> Result<(Address, usize)> {
    let word = read_word(data, offset)?;
    if word[..PADDING].iter().any(|b| *b != 0) {
        return Err(AbiError::MalformedInput(format!(
            "address word at byte {offset} has non-zero padding"
        )));
    }
    let address = Address::from_slice(&word[PADDING..])?;
    Ok((address, WORD_SIZE))
}

/// Always one word
pub fn encoding_length() -> usize {
    WORD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let addr = Address::from_hex("0x0005b7d915458ef540ade6068dfe2f44e8fa733c").unwrap();
        let mut buf = [0u8; 32];
        encode(&addr, &mut buf, 0).unwrap();
        assert!(buf[..12].iter().all(|b| *b == 0));
        assert_eq!(&buf[12..], addr.as_bytes());

        let (decoded, read) = decode(&buf, 0).unwrap();
        assert_eq!(decoded, addr);
        assert_eq!(read, 32);
        assert_eq!(
            decoded.to_string(),
            "0x0005b7d915458ef540ade6068dfe2f44e8fa733c"
        );
    }

    #[test]
    fn test_decode_rejects_dirty_padding() {
        let mut buf = [0u8; 32];
        buf[11] = 1;
        assert!(matches!(decode(&buf, 0), Err(AbiError::MalformedInput(_))));
    }
}
