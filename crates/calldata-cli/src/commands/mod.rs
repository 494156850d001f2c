//! CLI subcommands

pub mod call;
pub mod decode;
pub mod encode;
pub mod rlp;

use calldata_abi::ParamType;

/// Canonical type names, the form the signature-taking codec calls accept
fn type_names(params: &[ParamType]) -> Vec<String> {
    params.iter().map(ToString::to_string).collect()
}
