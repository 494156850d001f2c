//! Decode and unpack commands

use calldata_abi::call::decode_method;
use calldata_abi::{canonical_types, decode_params_at, unpack_params_at, Value};
use clap::Args;
use serde_json::Value as Json;

use super::type_names;
use crate::args::{parse_hex, parse_types, to_json};
use crate::output::{format_hex, Output};
use crate::{CliError, Config};

/// Types and standard-encoded data
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Comma-separated types
    pub types: String,
    /// Hex data, with or without 0x
    pub data: String,
    /// Byte offset where the encoding starts
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    /// Data is call data with a leading 4-byte selector
    #[arg(long, conflicts_with = "offset")]
    pub selector: bool,
}

impl DecodeArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let params = parse_types(&self.types)?;
        let data = parse_hex(&self.data)?;

        if self.selector {
            let call = decode_method(&type_names(&params), &data)?;
            let selector = format_hex(&call.selector, config.hex_prefix);
            let values = render(&call.args);
            Output::new(json)
                .field("selector", &selector)
                .field_value("values", values.clone())
                .message(&format!("{selector}\n{values}"))
                .print();
            return Ok(());
        }

        let (values, consumed) = decode_params_at(&params, &data, self.offset)?;
        print_values(json, &canonical_types(&params), &values, consumed);
        Ok(())
    }
}

/// Types and packed data
#[derive(Debug, Args)]
pub struct UnpackArgs {
    /// Comma-separated types
    pub types: String,
    /// Hex data, with or without 0x
    pub data: String,
    /// Byte offset where the encoding starts
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

impl UnpackArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let params = parse_types(&self.types)?;
        let data = parse_hex(&self.data)?;
        let (values, consumed) = unpack_params_at(&params, &data, self.offset)?;
        print_values(json, &canonical_types(&params), &values, consumed);
        Ok(())
    }
}

fn render(values: &[Value]) -> Json {
    Json::Array(values.iter().map(to_json).collect())
}

fn print_values(json: bool, types: &str, values: &[Value], consumed: usize) {
    let rendered = render(values);
    Output::new(json)
        .field("types", types)
        .field_value("values", rendered.clone())
        .field_u64("consumed", consumed as u64)
        .message(&rendered.to_string())
        .print();
}
