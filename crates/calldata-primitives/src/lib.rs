//! # calldata-primitives
//!
//! Fixed-width values shared by the calldata codecs.
//!
//! - [`Address`]: 20-byte account address, parsed from `0x` hex of at most 20 bytes
//! - [`H256`]: 32-byte digest (event topics, keccak output)
//! - [`U256`]: unsigned 256-bit integer, re-exported from `primitive-types`

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Size of an ABI word in bytes
pub const WORD_SIZE: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_holds_u256() {
        let mut word = [0u8; WORD_SIZE];
        U256::MAX.to_big_endian(&mut word);
        assert_eq!(word, [0xff; WORD_SIZE]);
    }
}
