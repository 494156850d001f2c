//! Encode, pack and length commands

use calldata_abi::{
    canonical_types, encode_params, encoding_length_params, pack_length_params, pack_params,
};
use clap::Args;

use crate::args::{parse_args, parse_types};
use crate::output::{format_hex, Output};
use crate::{CliError, Config};

/// Types and JSON arguments
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Comma-separated types, e.g. "uint256,(bool,string)[]"
    pub types: String,
    /// JSON array of arguments, e.g. '[1, [true, "hi"]]'
    pub args: String,
}

impl EncodeArgs {
    pub fn execute(self, config: &Config, json: bool, packed: bool) -> Result<(), CliError> {
        let params = parse_types(&self.types)?;
        let values = parse_args(&params, &self.args)?;
        let data = if packed {
            pack_params(&params, &values)?
        } else {
            encode_params(&params, &values)?
        };

        let hex = format_hex(&data, config.hex_prefix);
        Output::new(json)
            .field("types", &canonical_types(&params))
            .field("data", &hex)
            .field_u64("length", data.len() as u64)
            .message(&hex)
            .print();

        Ok(())
    }
}

/// Encoding length without encoding
#[derive(Debug, Args)]
pub struct LengthArgs {
    /// Comma-separated types
    pub types: String,
    /// JSON array of arguments
    pub args: String,
    /// Measure the packed encoding instead
    #[arg(long)]
    pub packed: bool,
}

impl LengthArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let params = parse_types(&self.types)?;
        let values = parse_args(&params, &self.args)?;
        let length = if self.packed {
            pack_length_params(&params, &values)?
        } else {
            encoding_length_params(&params, &values)?
        };

        Output::new(json)
            .field("types", &canonical_types(&params))
            .field_u64("length", length as u64)
            .message(&length.to_string())
            .print();

        Ok(())
    }
}
