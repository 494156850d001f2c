//! # calldata-cli
//!
//! Command-line encoder and decoder for contract call data.
//!
//! ## Usage
//!
//! ```bash
//! # Standard encoding
//! calldata encode "uint256,string" '[69, "hello"]'
//! calldata decode "uint256,string" 0x0000...
//! calldata decode "address,uint256" 0xa9059cbb... --selector
//!
//! # Packed encoding
//! calldata pack "int16,bytes1,uint16,string" '[-1, "0x42", 3, "Hello, world!"]'
//! calldata unpack "int16,bytes1,uint16,string" 0xffff42...
//!
//! # Call messages
//! calldata selector transfer "address,uint256"
//! calldata call transfer "address,uint256" '["0x...", 1000]'
//!
//! # Length-prefix encoding
//! calldata rlp encode '["cat", "dog"]'
//! calldata rlp decode 0xc88363617484646f67
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod args;
mod commands;
mod config;
mod error;
mod output;

use commands::call::{CallArgs, SelectorArgs};
use commands::decode::{DecodeArgs, UnpackArgs};
use commands::encode::{EncodeArgs, LengthArgs};
use commands::rlp::RlpCommand;
use config::Config;
use error::CliError;
use output::Output;

/// Contract call data codec
#[derive(Parser, Debug)]
#[command(name = "calldata")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode arguments with the standard head-tail layout
    Encode(EncodeArgs),
    /// Decode standard-encoded data
    Decode(DecodeArgs),
    /// Encode arguments tightly packed
    Pack(EncodeArgs),
    /// Decode packed data
    Unpack(UnpackArgs),
    /// Encoding length without encoding
    Length(LengthArgs),
    /// Method selector and event topic
    Selector(SelectorArgs),
    /// Selector-prefixed method call data
    Call(CallArgs),
    /// Length-prefix (RLP) encoding
    #[command(subcommand)]
    Rlp(RlpCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the log filter used when RUST_LOG is unset
        #[arg(long)]
        set_log_level: Option<String>,
        /// Prefix hex output with 0x
        #[arg(long)]
        set_hex_prefix: Option<bool>,
        /// Print JSON by default
        #[arg(long)]
        set_json: Option<bool>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = Config::load();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::debug!(?config, "loaded configuration");

    let json = cli.json || config.json;

    let result = match cli.command {
        Commands::Encode(cmd) => cmd.execute(&config, json, false),
        Commands::Decode(cmd) => cmd.execute(&config, json),
        Commands::Pack(cmd) => cmd.execute(&config, json, true),
        Commands::Unpack(cmd) => cmd.execute(json),
        Commands::Length(cmd) => cmd.execute(json),
        Commands::Selector(cmd) => cmd.execute(&config, json),
        Commands::Call(cmd) => cmd.execute(&config, json),
        Commands::Rlp(cmd) => cmd.execute(&config, json),
        Commands::Config {
            show,
            set_log_level,
            set_hex_prefix,
            set_json,
        } => handle_config(&mut config, show, set_log_level, set_hex_prefix, set_json, json),
    };

    if let Err(e) = result {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_log_level: Option<String>,
    set_hex_prefix: Option<bool>,
    set_json: Option<bool>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(level) = set_log_level {
        config.log_level = level;
        modified = true;
    }

    if let Some(prefix) = set_hex_prefix {
        config.hex_prefix = prefix;
        modified = true;
    }

    if let Some(default_json) = set_json {
        config.json = default_json;
        modified = true;
    }

    if modified {
        config.save()?;
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field_value("json", config.json.into())
            .field_value("hex_prefix", config.hex_prefix.into())
            .field("log_level", &config.log_level)
            .message(&format!(
                "JSON output: {}\nHex prefix: {}\nLog level: {}",
                config.json, config.hex_prefix, config.log_level
            ))
            .print();
    } else {
        Output::new(json)
            .message(
                "Use --show to display config, or --set-log-level/--set-hex-prefix/--set-json to modify",
            )
            .print();
    }

    Ok(())
}
