//! Handoff CLI

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
pub use {
    check::{CheckCmd, report},
    codec::{CodecAction, CodecCmd},
};

mod check;
mod codec;

/// Handoff CLI
#[derive(Debug, Parser)]
#[command(name = "handoff", version, about)]
pub struct App {
    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a worker config and print its routing plan
    Check(check::CheckCmd),

    /// Encode or decode disaggregated params read from stdin
    Codec(codec::CodecCmd),
}

impl App {
    /// Initialize tracing subscriber based on verbosity
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "handoff_core=debug,handoff=debug",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        // stdout carries command output
        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }
}
