//! Packed arrays: element encodings concatenated, no count, no offsets

use crate::error::{AbiError, Result};
use crate::types::{ArrayLength, ParamType, Value};
use crate::word::check_length;

use super::{decode_value, encode_value, packed_length, static_size};

/// Encode `values` back to back at `offset`
pub fn encode(
    values: &[Value],
    element: &ParamType,
    length: ArrayLength,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    check_count(values.len(), element, length)?;
    let mut written = 0;
    for value in values {
        written += encode_value(element, value, buf, offset + written)?;
    }
    Ok(written)
}

/// Decode an array of static `element`s at `offset`.
///
/// A length-prefixed array has no count on the wire, so it takes every
/// element that fits in `offset..end`.
pub fn decode(
    element: &ParamType,
    length: ArrayLength,
    data: &[u8],
    offset: usize,
    end: usize,
) -> Result<(Vec<Value>, usize)> {
    let size = match static_size(element) {
        Some(size) if size > 0 => size,
        _ => {
            return Err(AbiError::AmbiguousPacking(format!(
                "cannot unpack array of {element}"
            )))
        }
    };

    let count = match length {
        ArrayLength::Fixed(n) => n,
        ArrayLength::Dynamic => {
            let span = end.checked_sub(offset).ok_or_else(|| {
                AbiError::MalformedInput(format!("no room for array at byte {offset}"))
            })?;
            if span % size != 0 {
                return Err(AbiError::MalformedInput(format!(
                    "{span} bytes is not a whole number of {element} elements"
                )));
            }
            span / size
        }
    };
    let total = count.checked_mul(size).ok_or_else(|| {
        AbiError::MalformedInput(format!("array of {count} {element} elements overflows"))
    })?;
    check_length(data, offset, total)?;

    let mut values = Vec::with_capacity(count);
    let mut at = offset;
    for _ in 0..count {
        let (value, read) = decode_value(element, data, at, at + size)?;
        values.push(value);
        at += read;
    }
    Ok((values, at - offset))
}

/// Bytes [`encode`] writes for `values`
pub fn encoding_length(
    values: &[Value],
    element: &ParamType,
    length: ArrayLength,
) -> Result<usize> {
    check_count(values.len(), element, length)?;
    values
        .iter()
        .map(|value| packed_length(element, value))
        .sum()
}

fn check_count(count: usize, element: &ParamType, length: ArrayLength) -> Result<()> {
    match length {
        ArrayLength::Fixed(n) if n != count => Err(AbiError::mismatch(
            format!("{element}[{n}]"),
            format!("array of {count} elements"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint8_elements_are_one_byte() {
        let values: Vec<Value> = [1u64, 2, 3].iter().map(|v| Value::uint(*v)).collect();
        let element = ParamType::Uint(8);
        let mut buf = vec![0u8; 3];
        assert_eq!(
            encode(&values, &element, ArrayLength::Dynamic, &mut buf, 0).unwrap(),
            3
        );
        assert_eq!(buf, [1, 2, 3]);

        let (decoded, read) = decode(&element, ArrayLength::Dynamic, &buf, 0, 3).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(read, 3);
    }

    #[test]
    fn test_dynamic_span_must_divide() {
        let element = ParamType::Uint(16);
        assert!(matches!(
            decode(&element, ArrayLength::Dynamic, &[0u8; 5], 0, 5),
            Err(AbiError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_fixed_count() {
        let element = ParamType::Bool;
        let (decoded, read) =
            decode(&element, ArrayLength::Fixed(2), &[1, 0, 9], 0, 3).unwrap();
        assert_eq!(decoded, vec![Value::Bool(true), Value::Bool(false)]);
        assert_eq!(read, 2);
        assert!(matches!(
            encoding_length(&[Value::Bool(true)], &element, ArrayLength::Fixed(2)),
            Err(AbiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_dynamic_elements_rejected() {
        assert!(matches!(
            decode(&ParamType::String, ArrayLength::Dynamic, &[0u8; 4], 0, 4),
            Err(AbiError::AmbiguousPacking(_))
        ));
    }
}
