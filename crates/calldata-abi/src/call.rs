//! Call-message helpers: selectors, selector-prefixed method calls,
//! constructor payloads and return-data decoding.

use bytes::Bytes;
use calldata_primitives::H256;
use sha3::{Digest, Keccak256};

use crate::decode::{decode_params_at, unpack_params_at};
use crate::encode::{encode_params_into, encoding_length_params};
use crate::error::{AbiError, Result};
use crate::signature::{canonical_types, parse_signature, TypeSpec};
use crate::types::{ParamType, Value};

/// Selector width in bytes
pub const SELECTOR_LEN: usize = 4;

/// Keccak-256 of `data`
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_bytes(hasher.finalize().into())
}

/// Keccak-256 of `name(t1,t2,..)` with canonical type names, the event topic
pub fn event_id<T: Clone + Into<TypeSpec>>(name: &str, types: &[T]) -> Result<H256> {
    let params = parse_signature(types)?.params;
    Ok(signature_hash(name, &params))
}

/// First four bytes of [`event_id`]
pub fn method_id<T: Clone + Into<TypeSpec>>(name: &str, types: &[T]) -> Result<[u8; 4]> {
    Ok(event_id(name, types)?.selector())
}

/// Selector followed by the arguments encoded at offset 4
pub fn encode_method<T: Clone + Into<TypeSpec>>(
    name: &str,
    types: &[T],
    args: &[Value],
) -> Result<Bytes> {
    let params = parse_signature(types)?.params;
    let selector = signature_hash(name, &params).selector();
    encode_after(&selector, &params, args)
}

/// Events share the method layout
pub fn encode_event<T: Clone + Into<TypeSpec>>(
    name: &str,
    types: &[T],
    args: &[Value],
) -> Result<Bytes> {
    encode_method(name, types, args)
}

/// Contract bytecode followed by the constructor arguments
pub fn encode_constructor<T: Clone + Into<TypeSpec>>(
    bytecode: &[u8],
    types: &[T],
    args: &[Value],
) -> Result<Bytes> {
    let params = parse_signature(types)?.params;
    encode_after(bytecode, &params, args)
}

/// Selector and arguments of a method call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCall {
    /// Leading four bytes
    pub selector: [u8; 4],
    /// Arguments decoded from offset 4
    pub args: Vec<Value>,
}

/// Split call data into selector and arguments
pub fn decode_method<T: Clone + Into<TypeSpec>>(
    types: &[T],
    data: &[u8],
) -> Result<DecodedCall> {
    let params = parse_signature(types)?.params;
    let (head, _) = unpack_params_at(&[ParamType::FixedBytes(SELECTOR_LEN)], data, 0)?;
    let selector = match head.as_slice() {
        [Value::FixedBytes(bytes)] => {
            let mut selector = [0u8; SELECTOR_LEN];
            selector.copy_from_slice(bytes);
            selector
        }
        _ => return Err(AbiError::MalformedInput("missing selector".into())),
    };
    let (args, _) = decode_params_at(&params, data, SELECTOR_LEN)?;
    Ok(DecodedCall { selector, args })
}

/// Decode return data
pub fn decode_output<T: Clone + Into<TypeSpec>>(types: &[T], data: &[u8]) -> Result<Vec<Value>> {
    let params = parse_signature(types)?.params;
    Ok(decode_params_at(&params, data, 0)?.0)
}

/// Decode return data given as `0x` hex, as returned by JSON-RPC
pub fn decode_output_hex<T: Clone + Into<TypeSpec>>(
    types: &[T],
    data: &str,
) -> Result<Vec<Value>> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    let bytes = hex::decode(digits)
        .map_err(|e| AbiError::MalformedInput(format!("invalid hex return data: {e}")))?;
    decode_output(types, &bytes)
}

fn signature_hash(name: &str, params: &[ParamType]) -> H256 {
    keccak256(format!("{name}({})", canonical_types(params)).as_bytes())
}

fn encode_after(prefix: &[u8], params: &[ParamType], args: &[Value]) -> Result<Bytes> {
    let len = encoding_length_params(params, args)?;
    let mut out = vec![0u8; prefix.len() + len];
    out[..prefix.len()].copy_from_slice(prefix);
    encode_params_into(params, args, &mut out, prefix.len())?;
    Ok(Bytes::from(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calldata_primitives::{Address, U256};

    // ==================== Selectors ====================

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            keccak256(&[]).to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_method_id_transfer() {
        assert_eq!(
            method_id("transfer", &["address", "uint256"]).unwrap(),
            [0xa9, 0x05, 0x9c, 0xbb]
        );
        // `uint` is hashed under its canonical name
        assert_eq!(
            method_id("transfer", &["address", "uint"]).unwrap(),
            [0xa9, 0x05, 0x9c, 0xbb]
        );
    }

    #[test]
    fn test_event_id_transfer() {
        assert_eq!(
            event_id("Transfer", &["address", "address", "uint256"])
                .unwrap()
                .to_hex(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    // ==================== Call data ====================

    #[test]
    fn test_encode_method_transfer() {
        let to = Address::from_bytes([0x11; 20]);
        let data = encode_method(
            "transfer",
            &["address", "uint256"],
            &[to.into(), Value::uint(1000u64)],
        )
        .unwrap();

        assert_eq!(data.len(), 4 + 64);
        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(&data[16..36], to.as_bytes());
        assert_eq!(U256::from_big_endian(&data[36..68]), U256::from(1000u64));

        let call = decode_method(&["address", "uint256"], &data).unwrap();
        assert_eq!(call.selector, [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(call.args, vec![to.into(), Value::uint(1000u64)]);
    }

    #[test]
    fn test_dynamic_pointers_skip_selector() {
        let data = encode_method("setName", &["string"], &["alice".into()]).unwrap();
        // pointer is relative to the arguments, not to the selector
        assert_eq!(data[4 + 31], 0x20);
        assert_eq!(
            decode_method(&["string"], &data).unwrap().args,
            vec![Value::string("alice")]
        );
    }

    #[test]
    fn test_encode_constructor() {
        let bytecode = [0x60, 0x80, 0x60, 0x40, 0x52];
        let data =
            encode_constructor(&bytecode, &["bytes"], &[Value::Bytes(vec![0xab])]).unwrap();
        assert_eq!(&data[..5], &bytecode);
        assert_eq!(data.len(), 5 + 96);
        assert_eq!(data[5 + 31], 0x20);
        assert_eq!(data[5 + 63], 1);
        assert_eq!(data[5 + 64], 0xab);
    }

    #[test]
    fn test_decode_method_too_short() {
        assert!(matches!(
            decode_method(&["uint256"], &[0xa9, 0x05]),
            Err(AbiError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_decode_output_hex() {
        let hex_data = format!("0x{}{:02x}", "00".repeat(31), 42);
        assert_eq!(
            decode_output_hex(&["uint256"], &hex_data).unwrap(),
            vec![Value::uint(42u64)]
        );
        assert!(matches!(
            decode_output_hex(&["uint256"], "0xzz"),
            Err(AbiError::MalformedInput(_))
        ));
    }
}
