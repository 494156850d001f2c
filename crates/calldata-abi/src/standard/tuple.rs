//! Head-tail layout shared by tuples and arrays.
//!
//! Static fields are written inline in the head. Each dynamic field gets a
//! one-word slot in the head; its payload is appended to the tail in field
//! order and the slot is patched with the payload's distance from `start`.

use calldata_primitives::{U256, WORD_SIZE};
use tracing::trace;

use crate::error::{AbiError, Result};
use crate::types::{ParamType, Value};
use crate::word::{check_length, checked_end, ensure_capacity, read_usize, write_u256};

use super::{decode_value, encode_value, value_length};

/// Field types of a head-tail layout
#[derive(Debug, Clone, Copy)]
pub(crate) enum Fields<'a> {
    /// Tuple fields in declaration order
    Tuple(&'a [ParamType]),
    /// `n` array elements of one type
    Repeat(&'a ParamType, usize),
}

impl<'a> Fields<'a> {
    pub(crate) fn len(&self) -> usize {
        match self {
            Fields::Tuple(types) => types.len(),
            Fields::Repeat(_, n) => *n,
        }
    }

    fn iter(self) -> impl Iterator<Item = &'a ParamType> {
        let (types, repeat): (&'a [ParamType], Option<(&'a ParamType, usize)>) = match self {
            Fields::Tuple(types) => (types, None),
            Fields::Repeat(ty, n) => (&[], Some((ty, n))),
        };
        types.iter().chain(
            repeat
                .into_iter()
                .flat_map(|(ty, n)| std::iter::repeat(ty).take(n)),
        )
    }

    /// Head size, saturating for absurd declared lengths
    fn head_length(self) -> usize {
        match self {
            Fields::Tuple(types) => types
                .iter()
                .map(ParamType::head_length)
                .fold(0, usize::saturating_add),
            Fields::Repeat(ty, n) => ty.head_length().saturating_mul(n),
        }
    }

    fn check_count(self, got: usize) -> Result<()> {
        if got != self.len() {
            return Err(AbiError::ArgumentCountMismatch {
                expected: self.len(),
                got,
            });
        }
        Ok(())
    }
}

/// Encode `values` at `start`, returning the bytes written (head and tail)
pub(crate) fn encode(
    fields: Fields<'_>,
    values: &[Value],
    buf: &mut [u8],
    start: usize,
) -> Result<usize> {
    fields.check_count(values.len())?;

    let mut offset = start;
    let mut pending = Vec::new();

    // head
    for (index, (ty, value)) in fields.iter().zip(values).enumerate() {
        if ty.is_dynamic() {
            trace!(index, %ty, slot = offset, "reserving offset slot");
            ensure_capacity(buf, offset, WORD_SIZE)?;
            pending.push((index, ty, value, offset));
            offset += WORD_SIZE;
        } else {
            trace!(index, %ty, offset, "encoding static field");
            offset += encode_value(ty, value, buf, offset)?;
        }
    }

    // tail
    for (index, ty, value, slot) in pending {
        let pointer = offset - start;
        trace!(index, %ty, slot, pointer, "encoding dynamic field");
        write_u256(buf, slot, U256::from(pointer));
        offset += encode_value(ty, value, buf, offset)?;
    }

    Ok(offset - start)
}

/// Decode fields at `start`, returning the values and the head bytes read.
///
/// Pointers are resolved against `start`; tails may appear in any order.
pub(crate) fn decode(
    fields: Fields<'_>,
    data: &[u8],
    start: usize,
) -> Result<(Vec<Value>, usize)> {
    check_length(data, start, fields.head_length())?;

    let mut values = Vec::with_capacity(fields.len());
    let mut offset = start;

    for (index, ty) in fields.iter().enumerate() {
        if ty.is_dynamic() {
            let pointer = read_usize(data, offset)?;
            let at = checked_end(start, pointer)?;
            trace!(index, %ty, pointer, "decoding dynamic field");
            let (value, _) = decode_value(ty, data, at)?;
            values.push(value);
            offset += WORD_SIZE;
        } else {
            trace!(index, %ty, offset, "decoding static field");
            let (value, read) = decode_value(ty, data, offset)?;
            values.push(value);
            offset += read;
        }
    }

    Ok((values, offset - start))
}

/// Bytes [`encode`] writes, computed without a buffer
pub(crate) fn encoding_length(fields: Fields<'_>, values: &[Value]) -> Result<usize> {
    fields.check_count(values.len())?;

    let mut len = 0;
    for (ty, value) in fields.iter().zip(values) {
        len += if ty.is_dynamic() {
            WORD_SIZE + value_length(ty, value)?
        } else {
            ty.head_length()
        };
    }
    Ok(len)
}
