//! Type-signature parsing
//!
//! A signature is an ordered list of type strings (`"uint256"`, `"bytes4[]"`,
//! `"(bool,string)[2]"`) or nested lists standing for tuples. Parsing yields
//! one [`ParamType`] per entry; descriptors are rebuilt on every call.

use std::fmt;

use crate::error::{AbiError, Result};
use crate::types::ParamType;

/// One signature entry before parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// Type string, e.g. `"uint256[]"`
    Name(String),
    /// Nested list, parsed as a tuple
    Tuple(Vec<TypeSpec>),
}

impl TypeSpec {
    /// Nested tuple entry
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeSpec>,
    {
        TypeSpec::Tuple(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for TypeSpec {
    fn from(s: &str) -> Self {
        TypeSpec::Name(s.to_string())
    }
}

impl From<String> for TypeSpec {
    fn from(s: String) -> Self {
        TypeSpec::Name(s)
    }
}

impl From<&String> for TypeSpec {
    fn from(s: &String) -> Self {
        TypeSpec::Name(s.clone())
    }
}

/// Parsed signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Descriptors in declaration order
    pub params: Vec<ParamType>,
    /// True iff every parameter is static
    pub is_static: bool,
}

impl Signature {
    /// Parse a list of type strings or nested lists
    pub fn parse<T: Clone + Into<TypeSpec>>(types: &[T]) -> Result<Self> {
        let params = types
            .iter()
            .cloned()
            .map(|t| parse_spec(t.into()))
            .collect::<Result<Vec<_>>>()?;
        let is_static = params.iter().all(ParamType::is_static);
        Ok(Signature { params, is_static })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", canonical_types(&self.params))
    }
}

/// Comma-joined canonical type names, e.g. `uint256,(bool,string)[]`
pub fn canonical_types(params: &[ParamType]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a signature; see [`Signature::parse`]
pub fn parse_signature<T: Clone + Into<TypeSpec>>(types: &[T]) -> Result<Signature> {
    Signature::parse(types)
}

/// Parse a single signature entry
pub fn parse_spec(spec: TypeSpec) -> Result<ParamType> {
    match spec {
        TypeSpec::Name(name) => parse_type(&name),
        TypeSpec::Tuple(items) => Ok(ParamType::Tuple(
            items.into_iter().map(parse_spec).collect::<Result<_>>()?,
        )),
    }
}

/// Parse a comma-separated type list such as `uint256,(bool,bytes)[],string`
pub fn parse_type_list(list: &str) -> Result<Vec<ParamType>> {
    let list = list.trim();
    if list.is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list)?.into_iter().map(parse_type).collect()
}

/// Parse a type string (e.g. `"uint256"`, `"address[3][]"`, `"(int8,string)"`)
pub fn parse_type(s: &str) -> Result<ParamType> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid("empty type"));
    }

    // Outermost array suffix is the last one: uint8[2][] is an array of uint8[2]
    if let Some(body) = s.strip_suffix(']') {
        let open = body
            .rfind('[')
            .ok_or_else(|| invalid(format!("unbalanced brackets in {s}")))?;
        let element = parse_type(&body[..open])?;
        let len = &body[open + 1..];
        if len.is_empty() {
            return Ok(ParamType::Array(Box::new(element)));
        }
        let len = parse_positive(len)
            .ok_or_else(|| invalid(format!("invalid array length '{len}' in {s}")))?;
        return Ok(ParamType::FixedArray(Box::new(element), len));
    }

    if let Some(inner) = s.strip_prefix('(') {
        let inner = inner
            .strip_suffix(')')
            .ok_or_else(|| invalid(format!("unbalanced parentheses in {s}")))?;
        return Ok(ParamType::Tuple(parse_type_list(inner)?));
    }

    parse_elementary(s)
}

fn parse_elementary(s: &str) -> Result<ParamType> {
    if let Some(rest) = s.strip_prefix("int") {
        return Ok(ParamType::Int(parse_bits(rest, s)?));
    }
    if let Some(rest) = s.strip_prefix("uint") {
        return Ok(ParamType::Uint(parse_bits(rest, s)?));
    }
    if s == "bool" {
        return Ok(ParamType::Bool);
    }
    if s == "address" {
        return Ok(ParamType::Address);
    }
    if s.starts_with("fixed") || s.starts_with("ufixed") {
        return Err(AbiError::UnsupportedType(s.to_string()));
    }
    if s == "string" {
        return Ok(ParamType::String);
    }
    if let Some(rest) = s.strip_prefix("bytes") {
        if rest.is_empty() {
            return Ok(ParamType::Bytes);
        }
        return match parse_positive(rest) {
            Some(len) if check_byte_len(len).is_ok() => Ok(ParamType::FixedBytes(len)),
            _ => Err(invalid(format!("invalid byte length in {s}"))),
        };
    }

    Err(invalid(format!("unknown type: {s}")))
}

/// Bit width suffix: empty means 256, otherwise a multiple of 8 in 8..=256
fn parse_bits(suffix: &str, ty: &str) -> Result<usize> {
    if suffix.is_empty() {
        return Ok(256);
    }
    match parse_positive(suffix) {
        Some(bits) if valid_bits(bits) => Ok(bits),
        _ => Err(invalid(format!("invalid bit width in {ty}"))),
    }
}

fn valid_bits(bits: usize) -> bool {
    bits % 8 == 0 && (8..=256).contains(&bits)
}

/// Reject widths the parser would never produce, for hand-built descriptors
pub(crate) fn check_bits(bits: usize) -> Result<()> {
    if valid_bits(bits) {
        Ok(())
    } else {
        Err(invalid(format!("invalid bit width {bits}")))
    }
}

/// Same for `bytes<N>`
pub(crate) fn check_byte_len(len: usize) -> Result<()> {
    if (1..=32).contains(&len) {
        Ok(())
    } else {
        Err(invalid(format!("invalid byte length {len}")))
    }
}

fn parse_positive(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|n| *n > 0)
}

/// Split on commas that are not inside parentheses
fn split_top_level(list: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| invalid(format!("unbalanced parentheses in {list}")))?;
            }
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(invalid(format!("unbalanced parentheses in {list}")));
    }
    parts.push(&list[start..]);
    Ok(parts)
}

fn invalid(msg: impl Into<String>) -> AbiError {
    AbiError::InvalidSignature(msg.into())
}
