//! Codec command

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use hcore::{DisaggregatedParams, WireParams, codec};
use std::io::Read;

/// Codec command arguments
#[derive(Debug, Args)]
pub struct CodecCmd {
    /// Direction of the transform
    #[command(subcommand)]
    pub action: CodecAction,
}

/// Codec directions
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CodecAction {
    /// Native params (state as a byte array) to wire form
    Encode,
    /// Wire params (state as base64) to native form
    Decode,
}

impl CodecCmd {
    /// Run the codec command on stdin, writing JSON to stdout
    pub fn run(&self) -> Result<()> {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        println!("{}", self.action.apply(&input)?);
        Ok(())
    }
}

impl CodecAction {
    /// Transform one JSON document of params.
    pub fn apply(self, input: &str) -> Result<String> {
        let output = match self {
            Self::Encode => {
                let params: DisaggregatedParams =
                    serde_json::from_str(input).context("input is not native params JSON")?;
                serde_json::to_string_pretty(&codec::encode(&params))?
            }
            Self::Decode => {
                let params: WireParams =
                    serde_json::from_str(input).context("input is not wire params JSON")?;
                let params = codec::decode(&params).context("opaque_state is not valid base64")?;
                serde_json::to_string_pretty(&params)?
            }
        };
        Ok(output)
    }
}
