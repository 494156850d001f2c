//! Standard encoding: 32-byte words, static values inline, dynamic values
//! behind offset pointers.
//!
//! Each primitive module exposes `encode(value, .., buf, offset)`,
//! `decode(.., data, offset)` and `encoding_length(..)`; [`array`] and the
//! tuple layout compose them. Offsets and byte counts are always explicit.

pub mod address;
pub mod array;
pub mod boolean;
pub mod bytes;
pub mod fixed;
pub mod int;
pub mod string;
pub mod uint;
pub(crate) mod tuple;

use calldata_primitives::Address;

use crate::error::{AbiError, Result};
use crate::types::{ArrayLength, ParamType, Value, I256};

use self::tuple::Fields;

/// Encode one value of type `ty` at `offset`, returning the bytes written.
///
/// For a dynamic type this is the payload only; the caller owns the pointer.
pub(crate) fn encode_value(
    ty: &ParamType,
    value: &Value,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    match (ty, value) {
        (ParamType::Int(bits), Value::Int(v)) => int::encode(v, *bits, buf, offset),
        (ParamType::Int(bits), Value::Uint(v)) => {
            int::encode(&I256::new(*v, false), *bits, buf, offset)
        }
        (ParamType::Uint(bits), Value::Uint(v)) => uint::encode(v, *bits, buf, offset),
        (ParamType::Uint(bits), Value::Int(v)) => {
            if v.is_negative() {
                return Err(AbiError::OutOfRange(format!("negative value {v} for uint{bits}")));
            }
            uint::encode(&v.abs(), *bits, buf, offset)
        }
        (ParamType::Bool, Value::Bool(b)) => boolean::encode(*b, buf, offset),
        (ParamType::Address, Value::Address(a)) => address::encode(a, buf, offset),
        (ParamType::Address, Value::String(s)) => {
            address::encode(&Address::from_hex(s)?, buf, offset)
        }
        (ParamType::Bytes, Value::Bytes(data) | Value::FixedBytes(data)) => {
            bytes::encode(data, buf, offset)
        }
        (ParamType::FixedBytes(size), Value::FixedBytes(data) | Value::Bytes(data)) => {
            bytes::encode_fixed(data, *size, buf, offset)
        }
        (ParamType::String, Value::String(s)) => string::encode(s, buf, offset),
        (ParamType::Fixed(_) | ParamType::Ufixed(_), _) => {
            Err(AbiError::UnsupportedType(ty.to_string()))
        }
        (ParamType::Array(element), Value::Array(items)) => {
            array::encode(items, element, ArrayLength::Dynamic, buf, offset)
        }
        (ParamType::FixedArray(element, len), Value::Array(items)) => {
            array::encode(items, element, ArrayLength::Fixed(*len), buf, offset)
        }
        (ParamType::Tuple(types), Value::Tuple(items)) => {
            tuple::encode(Fields::Tuple(types), items, buf, offset)
        }
        _ => Err(AbiError::mismatch(ty, value.kind())),
    }
}

/// Decode one value of type `ty` at `offset`, returning it and the bytes read
pub(crate) fn decode_value(ty: &ParamType, data: &[u8], offset: usize) -> Result<(Value, usize)> {
    match ty {
        ParamType::Int(bits) => {
            int::decode(*bits, data, offset).map(|(v, read)| (Value::Int(v), read))
        }
        ParamType::Uint(bits) => {
            uint::decode(*bits, data, offset).map(|(v, read)| (Value::Uint(v), read))
        }
        ParamType::Bool => boolean::decode(data, offset).map(|(v, read)| (Value::Bool(v), read)),
        ParamType::Address => {
            address::decode(data, offset).map(|(v, read)| (Value::Address(v), read))
        }
        ParamType::Bytes => bytes::decode(data, offset).map(|(v, read)| (Value::Bytes(v), read)),
        ParamType::FixedBytes(size) => bytes::decode_fixed(*size, data, offset)
            .map(|(v, read)| (Value::FixedBytes(v), read)),
        ParamType::String => {
            string::decode(data, offset).map(|(v, read)| (Value::String(v), read))
        }
        ParamType::Fixed(_) | ParamType::Ufixed(_) => {
            Err(AbiError::UnsupportedType(ty.to_string()))
        }
        ParamType::Array(element) => array::decode(element, ArrayLength::Dynamic, data, offset)
            .map(|(v, read)| (Value::Array(v), read)),
        ParamType::FixedArray(element, len) => {
            array::decode(element, ArrayLength::Fixed(*len), data, offset)
                .map(|(v, read)| (Value::Array(v), read))
        }
        ParamType::Tuple(types) => tuple::decode(Fields::Tuple(types), data, offset)
            .map(|(v, read)| (Value::Tuple(v), read)),
    }
}

/// Bytes [`encode_value`] writes for `value`.
///
/// Static types never depend on the value; dynamic ones are measured from it.
pub(crate) fn value_length(ty: &ParamType, value: &Value) -> Result<usize> {
    if ty.is_static() {
        return Ok(ty.head_length());
    }
    match (ty, value) {
        (ParamType::Bytes, Value::Bytes(data) | Value::FixedBytes(data)) => {
            Ok(bytes::encoding_length(data.len()))
        }
        (ParamType::String, Value::String(s)) => Ok(string::encoding_length(s)),
        (ParamType::Array(element), Value::Array(items)) => {
            array::encoding_length(items, element, ArrayLength::Dynamic)
        }
        (ParamType::FixedArray(element, len), Value::Array(items)) => {
            array::encoding_length(items, element, ArrayLength::Fixed(*len))
        }
        (ParamType::Tuple(types), Value::Tuple(items)) => {
            tuple::encoding_length(Fields::Tuple(types), items)
        }
        _ => Err(AbiError::mismatch(ty, value.kind())),
    }
}
