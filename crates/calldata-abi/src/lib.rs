//! # calldata-abi
//!
//! Binary codec for smart-contract call data.
//!
//! ## Features
//!
//! - **Signatures**: type strings such as `uint256`, `bytes4[]` or
//!   `(address,string)[2]` parsed into [`ParamType`] descriptors
//! - **Standard encoding**: 32-byte words, dynamic values behind offset
//!   pointers ([`encode`], [`decode`], [`encoding_length`])
//! - **Packed encoding**: minimal bytes with no padding, for layouts that
//!   stay unambiguous ([`pack`], [`unpack`], [`pack_length`])
//! - **Call helpers**: selectors and selector-prefixed payloads ([`call`])
//!
//! ## Example
//!
//! ```rust
//! use calldata_abi::{decode, encode, Value};
//!
//! let types = ["uint256", "string"];
//! let args = [Value::uint(1u64), Value::string("hi")];
//!
//! let data = encode(&types, &args)?;
//! assert_eq!(data.len(), 128);
//! assert_eq!(decode(&types, &data)?, args);
//! # Ok::<(), calldata_abi::AbiError>(())
//! ```
//!
//! Encoding at an offset keeps pointers relative to the arguments, which is
//! how a selector prefix is added:
//!
//! ```rust
//! use calldata_abi::{call, decode_at, Value};
//!
//! let data = call::encode_method("transfer", &["address", "uint256"], &[
//!     Value::address("0x742d35cc6634c0532925a3b844bc9e7595f0ab3d")?,
//!     Value::uint(1000u64),
//! ])?;
//! assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
//!
//! let (args, _) = decode_at(&["address", "uint256"], &data, 4)?;
//! assert_eq!(args[1], Value::uint(1000u64));
//! # Ok::<(), calldata_abi::AbiError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod call;
mod decode;
mod encode;
mod error;
pub mod packed;
mod signature;
pub mod standard;
mod types;
mod word;

pub use decode::{
    decode, decode_at, decode_params, decode_params_at, unpack, unpack_at, unpack_params,
    unpack_params_at,
};
pub use encode::{
    encode, encode_into, encode_params, encode_params_into, encoding_length,
    encoding_length_params, pack, pack_into, pack_length, pack_length_params, pack_params,
    pack_params_into,
};
pub use error::{AbiError, Result};
pub use signature::{
    canonical_types, parse_signature, parse_spec, parse_type, parse_type_list, Signature,
    TypeSpec,
};
pub use types::{ArrayLength, NumericOpts, ParamType, Value, I256};

// Re-export primitives for convenience
pub use calldata_primitives::{Address, H256, U256};
