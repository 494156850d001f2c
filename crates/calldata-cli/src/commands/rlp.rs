//! Length-prefix (RLP) commands

use clap::Subcommand;
use serde_json::Value as Json;

use crate::args::{item_to_json, parse_hex, to_item};
use crate::output::{format_hex, Output};
use crate::{CliError, Config};

/// RLP subcommands
#[derive(Debug, Subcommand)]
pub enum RlpCommand {
    /// Encode a JSON string, number or nested array
    Encode {
        /// e.g. '["cat", "0x0102", 1024, []]'
        item: String,
    },
    /// Decode hex into nested arrays of 0x byte strings
    Decode {
        /// Hex data, with or without 0x
        data: String,
    },
}

impl RlpCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            RlpCommand::Encode { item } => encode(config, &item, json),
            RlpCommand::Decode { data } => decode(&data, json),
        }
    }
}

fn encode(config: &Config, item: &str, json: bool) -> Result<(), CliError> {
    let item = to_item(&serde_json::from_str::<Json>(item)?)?;
    let encoded = calldata_rlp::encode(&item);

    let hex = format_hex(&encoded, config.hex_prefix);
    Output::new(json)
        .field("data", &hex)
        .field_u64("length", encoded.len() as u64)
        .message(&hex)
        .print();

    Ok(())
}

fn decode(data: &str, json: bool) -> Result<(), CliError> {
    let item = calldata_rlp::decode(&parse_hex(data)?)?;
    let rendered = item_to_json(&item);

    Output::new(json)
        .field_value("item", rendered.clone())
        .message(&rendered.to_string())
        .print();

    Ok(())
}
