//! Homogeneous arrays.
//!
//! A length-prefixed array writes its element count first. The elements are
//! laid out as a tuple of `n` copies of the element type, so dynamic elements
//! get an offset table relative to the first element slot.

use calldata_primitives::{U256, WORD_SIZE};

use crate::error::{AbiError, Result};
use crate::types::{ArrayLength, ParamType, Value};
use crate::word::{checked_end, ensure_capacity, read_usize, write_u256};

use super::tuple::{self, Fields};

/// Encode `values` as an array of `element` at `offset`
pub fn encode(
    values: &[Value],
    element: &ParamType,
    length: ArrayLength,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    check_count(values.len(), element, length)?;

    let mut written = 0;
    if length == ArrayLength::Dynamic {
        ensure_capacity(buf, offset, WORD_SIZE)?;
        write_u256(buf, offset, U256::from(values.len()));
        written = WORD_SIZE;
    }
    written += tuple::encode(
        Fields::Repeat(element, values.len()),
        values,
        buf,
        offset + written,
    )?;
    Ok(written)
}

/// Decode an array of `element` at `offset`.
///
/// The byte count covers the length word and the element slots, not the
/// payloads of dynamic elements.
pub fn decode(
    element: &ParamType,
    length: ArrayLength,
    data: &[u8],
    offset: usize,
) -> Result<(Vec<Value>, usize)> {
    let (count, prefix) = match length {
        ArrayLength::Fixed(n) => (n, 0),
        ArrayLength::Dynamic => (read_usize(data, offset)?, WORD_SIZE),
    };
    let start = checked_end(offset, prefix)?;

    // Zero-sized elements occupy no head, so bound their count by the input
    if element.head_length() == 0 && count > data.len() {
        return Err(AbiError::MalformedInput(format!(
            "array of {count} empty elements at byte {offset}"
        )));
    }

    let (values, read) = tuple::decode(Fields::Repeat(element, count), data, start)?;
    Ok((values, prefix + read))
}

/// Bytes [`encode`] writes for `values`
pub fn encoding_length(
    values: &[Value],
    element: &ParamType,
    length: ArrayLength,
) -> Result<usize> {
    check_count(values.len(), element, length)?;
    let prefix = match length {
        ArrayLength::Dynamic => WORD_SIZE,
        ArrayLength::Fixed(_) => 0,
    };
    Ok(prefix + tuple::encoding_length(Fields::Repeat(element, values.len()), values)?)
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

    fn uints(values: &[u64]) -> Vec<Value> {
        values.iter().map(|v| Value::uint(*v)).collect()
    }

    #[test]
    fn test_dynamic_static_elements() {
        let element = ParamType::Uint(256);
        let values = uints(&[1, 2, 3]);
        let len = encoding_length(&values, &element, ArrayLength::Dynamic).unwrap();
        assert_eq!(len, 128);

        let mut buf = vec![0u8; len];
        assert_eq!(
            encode(&values, &element, ArrayLength::Dynamic, &mut buf, 0).unwrap(),
            128
        );
        assert_eq!(buf[31], 3);
        assert_eq!(buf[63], 1);
        assert_eq!(buf[127], 3);

        let (decoded, read) = decode(&element, ArrayLength::Dynamic, &buf, 0).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(read, 128);
    }

    #[test]
    fn test_empty_dynamic_array() {
        let element = ParamType::Bool;
        let mut buf = vec![0u8; 32];
        assert_eq!(encode(&[], &element, ArrayLength::Dynamic, &mut buf, 0).unwrap(), 32);
        assert_eq!(buf, vec![0u8; 32]);
        assert_eq!(
            decode(&element, ArrayLength::Dynamic, &buf, 0).unwrap(),
            (Vec::new(), 32)
        );
    }

    #[test]
    fn test_dynamic_elements_get_offset_table() {
        let element = ParamType::String;
        let values = vec![Value::string("one"), Value::string("two")];
        let len = encoding_length(&values, &element, ArrayLength::Fixed(2)).unwrap();
        // two offsets, then (length + content) twice
        assert_eq!(len, 64 + 64 + 64);

        let mut buf = vec![0u8; len];
        encode(&values, &element, ArrayLength::Fixed(2), &mut buf, 0).unwrap();
        assert_eq!(buf[31], 0x40);
        assert_eq!(buf[63], 0x80);
        assert_eq!(buf[95], 3);
        assert_eq!(&buf[96..99], b"one");
        assert_eq!(&buf[160..163], b"two");

        let (decoded, read) = decode(&element, ArrayLength::Fixed(2), &buf, 0).unwrap();
        assert_eq!(decoded, values);
        assert_eq!(read, 64);
    }

    #[test]
    fn test_offsets_relative_to_first_element() {
        let element = ParamType::Bytes;
        let values = vec![Value::Bytes(vec![0xaa])];
        let len = encoding_length(&values, &element, ArrayLength::Dynamic).unwrap();
        let mut buf = vec![0u8; len];
        encode(&values, &element, ArrayLength::Dynamic, &mut buf, 0).unwrap();

        assert_eq!(buf[31], 1); // count
        assert_eq!(buf[63], 0x20); // offset from the slot after the count
        assert_eq!(buf[95], 1);
        assert_eq!(buf[96], 0xaa);
    }

    #[test]
    fn test_fixed_length_mismatch() {
        let element = ParamType::Uint(8);
        let mut buf = vec![0u8; 96];
        assert!(matches!(
            encode(&uints(&[1, 2]), &element, ArrayLength::Fixed(3), &mut buf, 0),
            Err(AbiError::TypeMismatch { .. })
        ));
        assert!(matches!(
            encoding_length(&uints(&[1, 2, 3, 4]), &element, ArrayLength::Fixed(3)),
            Err(AbiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_huge_count_fails_cleanly() {
        let mut buf = vec![0u8; 64];
        buf[24] = 0x10; // 2^60 elements
        assert!(matches!(
            decode(&ParamType::Uint(256), ArrayLength::Dynamic, &buf, 0),
            Err(AbiError::MalformedInput(_))
        ));
    }
}
