//! Packed encoding: each field's minimal bytes concatenated, no padding and
//! no pointers.
//!
//! Without offsets the layout is only decodable when at most one field has a
//! value-dependent size. [`check_packable`] enforces that before any packing
//! or unpacking happens.

pub mod array;
pub mod primitive;

use calldata_primitives::Address;
use tracing::trace;

use crate::error::{AbiError, Result};
use crate::types::{ArrayLength, ParamType, Value, I256};

/// Reject field lists whose packed form could not be split back into fields
pub fn check_packable(params: &[ParamType]) -> Result<()> {
    let dynamic = params.iter().filter(|ty| ty.is_dynamic()).count();
    if dynamic > 1 {
        return Err(AbiError::AmbiguousPacking(format!(
            "{dynamic} dynamic fields, at most one allowed"
        )));
    }
    for (index, ty) in params.iter().enumerate() {
        if matches!(ty, ParamType::Array(_)) && index + 1 != params.len() {
            return Err(AbiError::AmbiguousPacking(format!(
                "length-prefixed {ty} must be the last field"
            )));
        }
        check_nested(ty)?;
    }
    Ok(())
}

fn check_nested(ty: &ParamType) -> Result<()> {
    match ty {
        ParamType::Fixed(_) | ParamType::Ufixed(_) => {
            Err(AbiError::UnsupportedType(ty.to_string()))
        }
        ParamType::Array(element) | ParamType::FixedArray(element, _) => {
            if element.is_dynamic() || static_size(element) == Some(0) {
                return Err(AbiError::AmbiguousPacking(format!(
                    "cannot pack array of {element}"
                )));
            }
            check_nested(element)
        }
        ParamType::Tuple(types) => {
            if ty.is_dynamic() {
                return Err(AbiError::AmbiguousPacking(format!(
                    "nested tuple {ty} has dynamic fields"
                )));
            }
            types.iter().try_for_each(check_nested)
        }
        _ => Ok(()),
    }
}

/// Packed size of a type whose size does not depend on its value
pub fn static_size(ty: &ParamType) -> Option<usize> {
    match ty {
        ParamType::Int(bits) | ParamType::Uint(bits) => Some(primitive::int_length(*bits)),
        ParamType::Bool => Some(1),
        ParamType::Address => Some(Address::LEN),
        ParamType::FixedBytes(size) => Some(*size),
        ParamType::FixedArray(element, len) => static_size(element)?.checked_mul(*len),
        ParamType::Tuple(types) => types
            .iter()
            .try_fold(0usize, |acc, ty| acc.checked_add(static_size(ty)?)),
        _ => None,
    }
}

/// Pack `values` at `start`, returning the bytes written
pub(crate) fn encode_fields(
    params: &[ParamType],
    values: &[Value],
    buf: &mut [u8],
    start: usize,
) -> Result<usize> {
    check_arity(params, values)?;
    let mut offset = start;
    for (index, (ty, value)) in params.iter().zip(values).enumerate() {
        trace!(index, %ty, offset, "packing field");
        offset += encode_value(ty, value, buf, offset)?;
    }
    Ok(offset - start)
}

/// Unpack fields at `start`, returning the values and bytes read.
///
/// The single dynamic field, if any, runs up to the bytes still needed by
/// the static fields after it (to the end of the data when it is last).
pub(crate) fn decode_fields(
    params: &[ParamType],
    data: &[u8],
    start: usize,
) -> Result<(Vec<Value>, usize)> {
    let mut values = Vec::with_capacity(params.len());
    let mut offset = start;
    for (index, ty) in params.iter().enumerate() {
        let end = match static_size(ty) {
            Some(size) => offset.saturating_add(size),
            None => {
                let reserved = params[index + 1..]
                    .iter()
                    .map(|ty| static_size(ty).unwrap_or(0))
                    .fold(0, usize::saturating_add);
                data.len().checked_sub(reserved).ok_or_else(|| {
                    AbiError::truncated(reserved.saturating_add(offset), data.len())
                })?
            }
        };
        trace!(index, %ty, offset, end, "unpacking field");
        let (value, read) = decode_value(ty, data, offset, end)?;
        values.push(value);
        offset += read;
    }
    Ok((values, offset - start))
}

/// Packed size of `values`, computed without a buffer
pub(crate) fn fields_length(params: &[ParamType], values: &[Value]) -> Result<usize> {
    check_arity(params, values)?;
    params
        .iter()
        .zip(values)
        .map(|(ty, value)| packed_length(ty, value))
        .sum()
}

fn check_arity(params: &[ParamType], values: &[Value]) -> Result<()> {
    if params.len() != values.len() {
        return Err(AbiError::ArgumentCountMismatch {
            expected: params.len(),
            got: values.len(),
        });
    }
    Ok(())
}

pub(crate) fn encode_value(
    ty: &ParamType,
    value: &Value,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    match (ty, value) {
        (ParamType::Int(bits), Value::Int(v)) => primitive::encode_int(v, *bits, buf, offset),
        (ParamType::Int(bits), Value::Uint(v)) => {
            primitive::encode_int(&I256::new(*v, false), *bits, buf, offset)
        }
        (ParamType::Uint(bits), Value::Uint(v)) => primitive::encode_uint(v, *bits, buf, offset),
        (ParamType::Uint(bits), Value::Int(v)) => {
            if v.is_negative() {
                return Err(AbiError::OutOfRange(format!("negative value {v} for uint{bits}")));
            }
            primitive::encode_uint(&v.abs(), *bits, buf, offset)
        }
        (ParamType::Bool, Value::Bool(b)) => primitive::encode_bool(*b, buf, offset),
        (ParamType::Address, Value::Address(a)) => primitive::encode_address(a, buf, offset),
        (ParamType::Address, Value::String(s)) => {
            primitive::encode_address(&Address::from_hex(s)?, buf, offset)
        }
        (ParamType::Bytes, Value::Bytes(data) | Value::FixedBytes(data)) => {
            primitive::encode_bytes(data, buf, offset)
        }
        (ParamType::FixedBytes(size), Value::FixedBytes(data) | Value::Bytes(data)) => {
            primitive::encode_fixed_bytes(data, *size, buf, offset)
        }
        (ParamType::String, Value::String(s)) => primitive::encode_string(s, buf, offset),
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
            encode_fields(types, items, buf, offset)
        }
        _ => Err(AbiError::mismatch(ty, value.kind())),
    }
}

/// Decode one field occupying at most `offset..end`
pub(crate) fn decode_value(
    ty: &ParamType,
    data: &[u8],
    offset: usize,
    end: usize,
) -> Result<(Value, usize)> {
    match ty {
        ParamType::Int(bits) => primitive::decode_int(*bits, data, offset)
            .map(|(v, read)| (Value::Int(v), read)),
        ParamType::Uint(bits) => primitive::decode_uint(*bits, data, offset)
            .map(|(v, read)| (Value::Uint(v), read)),
        ParamType::Bool => {
            primitive::decode_bool(data, offset).map(|(v, read)| (Value::Bool(v), read))
        }
        ParamType::Address => {
            primitive::decode_address(data, offset).map(|(v, read)| (Value::Address(v), read))
        }
        ParamType::Bytes => primitive::decode_bytes(data, offset, end)
            .map(|(v, read)| (Value::Bytes(v), read)),
        ParamType::FixedBytes(size) => primitive::decode_fixed_bytes(*size, data, offset)
            .map(|(v, read)| (Value::FixedBytes(v), read)),
        ParamType::String => primitive::decode_string(data, offset, end)
            .map(|(v, read)| (Value::String(v), read)),
        ParamType::Fixed(_) | ParamType::Ufixed(_) => {
            Err(AbiError::UnsupportedType(ty.to_string()))
        }
        ParamType::Array(element) => {
            array::decode(element, ArrayLength::Dynamic, data, offset, end)
                .map(|(v, read)| (Value::Array(v), read))
        }
        ParamType::FixedArray(element, len) => {
            array::decode(element, ArrayLength::Fixed(*len), data, offset, end)
                .map(|(v, read)| (Value::Array(v), read))
        }
        ParamType::Tuple(types) => {
            decode_fields(types, data, offset).map(|(v, read)| (Value::Tuple(v), read))
        }
    }
}

/// Packed size of one value
pub(crate) fn packed_length(ty: &ParamType, value: &Value) -> Result<usize> {
    match (ty, value) {
        (ParamType::Bytes, Value::Bytes(data) | Value::FixedBytes(data)) => Ok(data.len()),
        (ParamType::String, Value::String(s)) => Ok(s.len()),
        (ParamType::Array(element), Value::Array(items)) => {
            array::encoding_length(items, element, ArrayLength::Dynamic)
        }
        (ParamType::FixedArray(element, len), Value::Array(items)) => {
            array::encoding_length(items, element, ArrayLength::Fixed(*len))
        }
        (ParamType::Tuple(types), Value::Tuple(items)) => fields_length(types, items),
        (ParamType::Fixed(_) | ParamType::Ufixed(_), _) => {
            Err(AbiError::UnsupportedType(ty.to_string()))
        }
        _ => static_size(ty).ok_or_else(|| AbiError::mismatch(ty, value.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parse_type_list;

    fn check(list: &str) -> Result<()> {
        check_packable(&parse_type_list(list).unwrap())
    }

    #[test]
    fn test_packable_layouts() {
        assert!(check("uint8,address,bool").is_ok());
        assert!(check("uint16,string").is_ok());
        assert!(check("string,uint16").is_ok());
        assert!(check("bool,uint8[]").is_ok());
        assert!(check("uint8[3],bytes").is_ok());
        assert!(check("bytes4[2],(uint8,bool)").is_ok());
    }

    #[test]
    fn test_ambiguous_layouts() {
        for list in [
            "string,bytes",
            "uint8[],bool",
            "string[]",
            "bytes[2]",
            "uint8[][]",
            "(uint8,string)",
            "uint8[],string",
            "()[]",
        ] {
            assert!(
                matches!(check(list), Err(AbiError::AmbiguousPacking(_))),
                "{list} should be ambiguous"
            );
        }
    }

    #[test]
    fn test_static_size() {
        assert_eq!(static_size(&ParamType::Uint(24)), Some(3));
        assert_eq!(static_size(&ParamType::Address), Some(20));
        assert_eq!(
            static_size(&ParamType::FixedArray(Box::new(ParamType::Int(16)), 4)),
            Some(8)
        );
        assert_eq!(static_size(&ParamType::String), None);
    }

    #[test]
    fn test_dynamic_field_before_static_tail() {
        let params = parse_type_list("uint8,string,uint16").unwrap();
        let values = vec![Value::uint(1u64), Value::string("hey"), Value::uint(0x0203u64)];
        let len = fields_length(&params, &values).unwrap();
        assert_eq!(len, 6);

        let mut buf = vec![0u8; len];
        encode_fields(&params, &values, &mut buf, 0).unwrap();
        assert_eq!(buf, [1, b'h', b'e', b'y', 2, 3]);

        let (decoded, read) = decode_fields(&params, &buf, 0).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(read, 6);
    }
}
