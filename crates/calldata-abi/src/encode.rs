//! Encoding entry points.
//!
//! Every function parses the signature afresh, sizes the output with a
//! length pass, then encodes. Caller buffers are only written once the
//! whole encoding has succeeded.

use tracing::debug;

use crate::error::Result;
use crate::packed;
use crate::signature::{canonical_types, parse_signature, TypeSpec};
use crate::standard::tuple::{self, Fields};
use crate::types::{ParamType, Value};
use crate::word::ensure_capacity;

/// Encode `values` with the standard head-tail layout
pub fn encode<T: Clone + Into<TypeSpec>>(types: &[T], values: &[Value]) -> Result<Vec<u8>> {
    encode_params(&parse_signature(types)?.params, values)
}

/// [`encode`] with already parsed types
pub fn encode_params(params: &[ParamType], values: &[Value]) -> Result<Vec<u8>> {
    let len = encoding_length_params(params, values)?;
    let mut out = vec![0u8; len];
    let written = tuple::encode(Fields::Tuple(params), values, &mut out, 0)?;
    debug_assert_eq!(written, len);
    debug!(types = %canonical_types(params), bytes = written, "encoded arguments");
    Ok(out)
}

/// Encode into `buf` starting at `offset`, returning the bytes written.
///
/// Pointers are relative to `offset`, so the bytes match [`encode`] exactly.
pub fn encode_into<T: Clone + Into<TypeSpec>>(
    types: &[T],
    values: &[Value],
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    encode_params_into(&parse_signature(types)?.params, values, buf, offset)
}

/// [`encode_into`] with already parsed types
pub fn encode_params_into(
    params: &[ParamType],
    values: &[Value],
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    let len = encoding_length_params(params, values)?;
    ensure_capacity(buf, offset, len)?;
    let encoded = encode_params(params, values)?;
    buf[offset..offset + len].copy_from_slice(&encoded);
    Ok(len)
}

/// Bytes [`encode`] would produce, without encoding
pub fn encoding_length<T: Clone + Into<TypeSpec>>(
    types: &[T],
    values: &[Value],
) -> Result<usize> {
    encoding_length_params(&parse_signature(types)?.params, values)
}

/// [`encoding_length`] with already parsed types
pub fn encoding_length_params(params: &[ParamType], values: &[Value]) -> Result<usize> {
    tuple::encoding_length(Fields::Tuple(params), values)
}

/// Encode `values` with the packed layout
pub fn pack<T: Clone + Into<TypeSpec>>(types: &[T], values: &[Value]) -> Result<Vec<u8>> {
    pack_params(&parse_signature(types)?.params, values)
}

/// [`pack`] with already parsed types
pub fn pack_params(params: &[ParamType], values: &[Value]) -> Result<Vec<u8>> {
    let len = pack_length_params(params, values)?;
    let mut out = vec![0u8; len];
    let written = packed::encode_fields(params, values, &mut out, 0)?;
    debug_assert_eq!(written, len);
    debug!(types = %canonical_types(params), bytes = written, "packed arguments");
    Ok(out)
}

/// Pack into `buf` starting at `offset`, returning the bytes written
pub fn pack_into<T: Clone + Into<TypeSpec>>(
    types: &[T],
    values: &[Value],
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    pack_params_into(&parse_signature(types)?.params, values, buf, offset)
}

/// [`pack_into`] with already parsed types
pub fn pack_params_into(
    params: &[ParamType],
    values: &[Value],
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    let len = pack_length_params(params, values)?;
    ensure_capacity(buf, offset, len)?;
    let packed = pack_params(params, values)?;
    buf[offset..offset + len].copy_from_slice(&packed);
    Ok(len)
}

/// Bytes [`pack`] would produce, without packing
pub fn pack_length<T: Clone + Into<TypeSpec>>(types: &[T], values: &[Value]) -> Result<usize> {
    pack_length_params(&parse_signature(types)?.params, values)
}

/// [`pack_length`] with already parsed types
pub fn pack_length_params(params: &[ParamType], values: &[Value]) -> Result<usize> {
    packed::check_packable(params)?;
    packed::fields_length(params, values)
}
