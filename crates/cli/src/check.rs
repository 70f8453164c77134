//! Check command

use anyhow::{Context, Result};
use clap::Args;
use hcore::{RemoteCall, WorkerConfig};
use std::path::PathBuf;

/// Check command arguments
#[derive(Debug, Args)]
pub struct CheckCmd {
    /// Path to the worker config (TOML)
    pub config: PathBuf,
}

impl CheckCmd {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = WorkerConfig::load(&self.config)
            .with_context(|| format!("invalid worker config {}", self.config.display()))?;
        tracing::info!(path = %self.config.display(), "worker config is valid");
        print!("{}", report(&config));
        Ok(())
    }
}

/// Render the routing plan of a validated config.
pub fn report(config: &WorkerConfig) -> String {
    let route = config.route();
    let role = match route.initiator {
        None => "aggregated",
        Some(true) => "initiator",
        Some(false) => "responder",
    };
    let remote = match route.remote {
        RemoteCall::None => "none",
        RemoteCall::Before => "before local generation",
        RemoteCall::After => "after local generation",
    };

    let mut out = format!(
        "mode:     {}\nstrategy: {}\nrole:     {role}\nremote:   {remote}\n",
        config.disaggregation_mode, config.disaggregation_strategy,
    );
    if let Some(endpoint) = &config.next_endpoint {
        let unused = if route.needs_next() { "" } else { " (unused)" };
        out.push_str(&format!("next:     {endpoint}{unused}\n"));
    }
    out
}
