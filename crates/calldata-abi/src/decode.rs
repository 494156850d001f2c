//! Decoding entry points

use tracing::debug;

use crate::error::Result;
use crate::packed;
use crate::signature::{canonical_types, parse_signature, TypeSpec};
use crate::standard::tuple::{self, Fields};
use crate::types::{ParamType, Value};

/// Decode standard-encoded `data` from its first byte
pub fn decode<T: Clone + Into<TypeSpec>>(types: &[T], data: &[u8]) -> Result<Vec<Value>> {
    decode_at(types, data, 0).map(|(values, _)| values)
}

/// [`decode`] with already parsed types
pub fn decode_params(params: &[ParamType], data: &[u8]) -> Result<Vec<Value>> {
    decode_params_at(params, data, 0).map(|(values, _)| values)
}

/// Decode an encoding that starts at `offset`, e.g. after a 4-byte selector.
///
/// Returns the values and the head bytes read; pointers are resolved
/// relative to `offset`.
pub fn decode_at<T: Clone + Into<TypeSpec>>(
    types: &[T],
    data: &[u8],
    offset: usize,
) -> Result<(Vec<Value>, usize)> {
    decode_params_at(&parse_signature(types)?.params, data, offset)
}

/// [`decode_at`] with already parsed types
pub fn decode_params_at(
    params: &[ParamType],
    data: &[u8],
    offset: usize,
) -> Result<(Vec<Value>, usize)> {
    let (values, read) = tuple::decode(Fields::Tuple(params), data, offset)?;
    debug!(types = %canonical_types(params), offset, bytes = read, "decoded arguments");
    Ok((values, read))
}

/// Decode packed `data` from its first byte
pub fn unpack<T: Clone + Into<TypeSpec>>(types: &[T], data: &[u8]) -> Result<Vec<Value>> {
    unpack_at(types, data, 0).map(|(values, _)| values)
}

/// [`unpack`] with already parsed types
pub fn unpack_params(params: &[ParamType], data: &[u8]) -> Result<Vec<Value>> {
    unpack_params_at(params, data, 0).map(|(values, _)| values)
}

/// Decode a packed encoding starting at `offset`, returning the values and
/// bytes read.
///
/// A trailing dynamic field consumes the rest of `data`.
pub fn unpack_at<T: Clone + Into<TypeSpec>>(
    types: &[T],
    data: &[u8],
    offset: usize,
) -> Result<(Vec<Value>, usize)> {
    unpack_params_at(&parse_signature(types)?.params, data, offset)
}

/// [`unpack_at`] with already parsed types
pub fn unpack_params_at(
    params: &[ParamType],
    data: &[u8],
    offset: usize,
) -> Result<(Vec<Value>, usize)> {
    packed::check_packable(params)?;
    let (values, read) = packed::decode_fields(params, data, offset)?;
    debug!(types = %canonical_types(params), offset, bytes = read, "unpacked arguments");
    Ok((values, read))
}
