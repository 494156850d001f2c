//! JSON arguments to codec values and back
//!
//! Integers are JSON numbers or decimal / `0x` hex strings, byte strings and
//! addresses are `0x` hex, arrays and tuples are JSON arrays. Decoded
//! integers render as decimal strings so wide values survive JSON.

use calldata_abi::{parse_type_list, AbiError, ParamType, Value, I256, U256};
use calldata_rlp::Item;
use serde_json::Value as Json;

use crate::CliError;

/// Parse a comma-separated type list
pub fn parse_types(list: &str) -> Result<Vec<ParamType>, CliError> {
    Ok(parse_type_list(list)?)
}

/// Parse a JSON array of arguments against `params`
pub fn parse_args(params: &[ParamType], json: &str) -> Result<Vec<Value>, CliError> {
    let args = match serde_json::from_str::<Json>(json)? {
        Json::Array(args) => args,
        other => {
            return Err(CliError::InvalidInput(format!(
                "arguments must be a JSON array, got {other}"
            )))
        }
    };
    if args.len() != params.len() {
        return Err(AbiError::ArgumentCountMismatch {
            expected: params.len(),
            got: args.len(),
        }
        .into());
    }
    params.iter().zip(&args).map(|(ty, arg)| to_value(ty, arg)).collect()
}

/// Convert one JSON argument to a value of type `ty`
pub fn to_value(ty: &ParamType, json: &Json) -> Result<Value, CliError> {
    let value = match (ty, json) {
        (ParamType::Uint(_), Json::Number(n)) => match n.as_u64() {
            Some(n) => Value::Uint(U256::from(n)),
            None => return Err(mismatch(ty, json)),
        },
        (ParamType::Uint(_), Json::String(s)) => Value::Uint(parse_u256(s)?),
        (ParamType::Int(_), Json::Number(n)) => {
            if let Some(n) = n.as_i64() {
                Value::Int(I256::from(n))
            } else if let Some(n) = n.as_u64() {
                Value::Int(I256::new(U256::from(n), false))
            } else {
                return Err(mismatch(ty, json));
            }
        }
        (ParamType::Int(_), Json::String(s)) => {
            let (digits, negative) = match s.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (s.as_str(), false),
            };
            Value::Int(I256::new(parse_u256(digits)?, negative))
        }
        (ParamType::Bool, Json::Bool(b)) => Value::Bool(*b),
        (ParamType::Address, Json::String(s)) => Value::address(s)?,
        (ParamType::Bytes, Json::String(s)) => Value::Bytes(parse_hex(s)?),
        (ParamType::FixedBytes(_), Json::String(s)) => Value::FixedBytes(parse_hex(s)?),
        (ParamType::String, Json::String(s)) => Value::String(s.clone()),
        (ParamType::Array(element), Json::Array(items))
        | (ParamType::FixedArray(element, _), Json::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| to_value(element, item))
                .collect::<Result<_, _>>()?,
        ),
        (ParamType::Tuple(fields), Json::Array(items)) => {
            if fields.len() != items.len() {
                return Err(AbiError::ArgumentCountMismatch {
                    expected: fields.len(),
                    got: items.len(),
                }
                .into());
            }
            Value::Tuple(
                fields
                    .iter()
                    .zip(items)
                    .map(|(field, item)| to_value(field, item))
                    .collect::<Result<_, _>>()?,
            )
        }
        _ => return Err(mismatch(ty, json)),
    };
    Ok(value)
}

/// Render a decoded value as JSON
pub fn to_json(value: &Value) -> Json {
    match value {
        Value::Int(i) => Json::String(i.to_string()),
        Value::Uint(u) => Json::String(u.to_string()),
        Value::Bool(b) => Json::Bool(*b),
        Value::Address(a) => Json::String(a.to_hex()),
        Value::Bytes(b) | Value::FixedBytes(b) => Json::String(format!("0x{}", hex::encode(b))),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(items) | Value::Tuple(items) => Json::Array(items.iter().map(to_json).collect()),
    }
}

/// Build a length-prefix item: `0x` strings are bytes, other strings UTF-8,
/// numbers minimal big-endian, arrays lists
pub fn to_item(json: &Json) -> Result<Item, CliError> {
    match json {
        Json::String(s) if s.starts_with("0x") => Ok(Item::Bytes(parse_hex(s)?)),
        Json::String(s) => Ok(Item::from(s.as_str())),
        Json::Number(n) => n
            .as_u64()
            .map(Item::from)
            .ok_or_else(|| CliError::InvalidInput(format!("not an unsigned integer: {n}"))),
        Json::Array(items) => Ok(Item::List(
            items.iter().map(to_item).collect::<Result<_, _>>()?,
        )),
        other => Err(CliError::InvalidInput(format!(
            "cannot encode {other} as a length-prefixed item"
        ))),
    }
}

/// Render a length-prefix item as JSON, byte strings as `0x` hex
pub fn item_to_json(item: &Item) -> Json {
    match item {
        Item::Bytes(b) => Json::String(format!("0x{}", hex::encode(b))),
        Item::List(items) => Json::Array(items.iter().map(item_to_json).collect()),
    }
}

/// Decode hex with or without `0x`
pub fn parse_hex(s: &str) -> Result<Vec<u8>, CliError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| CliError::InvalidHex(format!("{s}: {e}")))
}

fn parse_u256(s: &str) -> Result<U256, CliError> {
    let parsed = match s.strip_prefix("0x") {
        Some(digits) if !digits.is_empty() => U256::from_str_radix(digits, 16).ok(),
        Some(_) => None,
        None => U256::from_dec_str(s).ok(),
    };
    parsed.ok_or_else(|| CliError::InvalidInput(format!("not an integer: {s}")))
}

fn mismatch(ty: &ParamType, json: &Json) -> CliError {
    CliError::InvalidInput(format!("expected {ty} argument, got {json}"))
}
