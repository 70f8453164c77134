//! Worker configuration.
//!
//! A worker is configured once at startup with a disaggregation mode, a
//! strategy and, when it initiates the handoff, a next-hop peer. The same
//! validation rules apply to the file form ([`WorkerConfig`]) and to the
//! live form bound to collaborators (`HandlerConfig` in `handoff-handler`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

/// Which phases this worker runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisaggregationMode {
    /// Context phase only.
    Prefill,
    /// Generation phase only.
    Decode,
    /// Both phases, no peer.
    PrefillAndDecode,
}

/// Which worker receives the client request and initiates the handoff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisaggregationStrategy {
    /// The prefill worker runs first and calls the decode peer.
    PrefillFirst,
    /// The decode worker calls the prefill peer, then generates.
    #[default]
    DecodeFirst,
}

impl DisaggregationMode {
    /// Config-file spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prefill => "prefill",
            Self::Decode => "decode",
            Self::PrefillAndDecode => "prefill_and_decode",
        }
    }
}

impl DisaggregationStrategy {
    /// Config-file spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrefillFirst => "prefill_first",
            Self::DecodeFirst => "decode_first",
        }
    }
}

impl fmt::Display for DisaggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DisaggregationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisaggregationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prefill" => Ok(Self::Prefill),
            "decode" => Ok(Self::Decode),
            "prefill_and_decode" => Ok(Self::PrefillAndDecode),
            other => Err(Error::config(format!("invalid disaggregation_mode '{other}'"))),
        }
    }
}

impl FromStr for DisaggregationStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prefill_first" => Ok(Self::PrefillFirst),
            "decode_first" => Ok(Self::DecodeFirst),
            other => Err(Error::config(format!("invalid disaggregation_strategy '{other}'"))),
        }
    }
}

/// Check that a worker which initiates the handoff has a peer to call.
pub fn validate(
    mode: DisaggregationMode,
    strategy: DisaggregationStrategy,
    has_next: bool,
) -> Result<()> {
    if has_next {
        return Ok(());
    }
    match (mode, strategy) {
        (DisaggregationMode::Prefill, DisaggregationStrategy::PrefillFirst) => Err(Error::config(
            "next client is required when disaggregation_mode='prefill' and \
             disaggregation_strategy='prefill_first'",
        )),
        (DisaggregationMode::Decode, DisaggregationStrategy::DecodeFirst) => Err(Error::config(
            "next client is required when disaggregation_mode='decode' and \
             disaggregation_strategy='decode_first'",
        )),
        _ => Ok(()),
    }
}

/// When a worker calls its peer relative to local generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    /// No remote call.
    None,
    /// Remote call before local generation.
    Before,
    /// Remote call after local generation.
    After,
}

/// Routing plan of a worker: whether it initiates the handoff and when it
/// calls the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// `None` in aggregated mode, where there is no handoff.
    pub initiator: Option<bool>,
    /// Position of the remote call.
    pub remote: RemoteCall,
}

impl Route {
    /// Plan for a mode and strategy.
    pub fn of(mode: DisaggregationMode, strategy: DisaggregationStrategy) -> Self {
        use DisaggregationMode as M;
        use DisaggregationStrategy as S;
        let (initiator, remote) = match (mode, strategy) {
            (M::Prefill, S::PrefillFirst) => (Some(true), RemoteCall::After),
            (M::Prefill, S::DecodeFirst) => (Some(false), RemoteCall::None),
            (M::Decode, S::DecodeFirst) => (Some(true), RemoteCall::Before),
            (M::Decode, S::PrefillFirst) => (Some(false), RemoteCall::None),
            (M::PrefillAndDecode, _) => (None, RemoteCall::None),
        };
        Self { initiator, remote }
    }

    /// Whether this worker needs a next-hop client.
    pub fn needs_next(&self) -> bool {
        self.remote != RemoteCall::None
    }
}

/// Worker configuration loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Phases run by this worker.
    pub disaggregation_mode: DisaggregationMode,

    /// Handoff direction.
    #[serde(default)]
    pub disaggregation_strategy: DisaggregationStrategy,

    /// Endpoint of the peer pool (supports `${ENV_VAR}` expansion).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_endpoint: Option<String>,
}

impl WorkerConfig {
    /// Create a config without a peer.
    pub fn new(mode: DisaggregationMode, strategy: DisaggregationStrategy) -> Self {
        Self {
            disaggregation_mode: mode,
            disaggregation_strategy: strategy,
            next_endpoint: None,
        }
    }

    /// Set the peer endpoint.
    pub fn next_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.next_endpoint = Some(endpoint.into());
        self
    }

    /// Parse a TOML string, expanding environment variables first.
    ///
    /// Parse failures, including an unknown mode, are configuration errors.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = expand_env_vars(toml_str);
        let mut config: Self =
            toml::from_str(&expanded).map_err(|e| Error::config(e.to_string()))?;
        // an endpoint from an unset `${VAR}` is no endpoint
        config.next_endpoint = config.next_endpoint.filter(|e| !e.is_empty());
        Ok(config)
    }

    /// Load and validate configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the next-hop rules.
    pub fn validate(&self) -> Result<()> {
        validate(
            self.disaggregation_mode,
            self.disaggregation_strategy,
            self.next_endpoint.is_some(),
        )
    }

    /// Routing plan of this worker.
    pub fn route(&self) -> Route {
        Route::of(self.disaggregation_mode, self.disaggregation_strategy)
    }
}

/// Expand `${VAR}` patterns with environment variable values.
///
/// Unset variables expand to an empty string. An unterminated `${` is kept
/// verbatim so TOML reports it where it appears.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let name = &rest[start + 2..start + 2 + len];
        if let Ok(value) = std::env::var(name) {
            out.push_str(&value);
        }
        rest = &rest[start + 3 + len..];
    }
    out.push_str(rest);
    out
}
