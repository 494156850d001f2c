//! Selector and method-call commands

use calldata_abi::call::{encode_method, event_id, method_id};
use calldata_abi::canonical_types;
use clap::Args;

use super::type_names;
use crate::args::{parse_args, parse_types};
use crate::output::{format_hex, Output};
use crate::{CliError, Config};

/// Method or event name and its types
#[derive(Debug, Args)]
pub struct SelectorArgs {
    /// Method or event name, e.g. "transfer"
    pub name: String,
    /// Comma-separated parameter types
    #[arg(default_value = "")]
    pub types: String,
    /// Print the full 32-byte event topic instead of the selector
    #[arg(long)]
    pub event: bool,
}

impl SelectorArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let params = parse_types(&self.types)?;
        let names = type_names(&params);
        let signature = format!("{}({})", self.name, canonical_types(&params));
        let selector = format_hex(&method_id(&self.name, &names)?, config.hex_prefix);
        let topic = format_hex(event_id(&self.name, &names)?.as_bytes(), config.hex_prefix);

        let message = if self.event { &topic } else { &selector };
        Output::new(json)
            .field("signature", &signature)
            .field("selector", &selector)
            .field("topic", &topic)
            .message(message)
            .print();

        Ok(())
    }
}

/// Method call: selector followed by encoded arguments
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Method name
    pub name: String,
    /// Comma-separated parameter types
    pub types: String,
    /// JSON array of arguments
    pub args: String,
}

impl CallArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let params = parse_types(&self.types)?;
        let values = parse_args(&params, &self.args)?;
        let data = encode_method(&self.name, &type_names(&params), &values)?;

        let hex = format_hex(&data, config.hex_prefix);
        Output::new(json)
            .field(
                "signature",
                &format!("{}({})", self.name, canonical_types(&params)),
            )
            .field("data", &hex)
            .field_u64("length", data.len() as u64)
            .message(&hex)
            .print();

        Ok(())
    }
}
