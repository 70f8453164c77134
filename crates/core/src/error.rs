//! Error taxonomy for the handoff router.
//!
//! Configuration and protocol errors are defects for operators. Decode errors
//! are data-integrity faults scoped to the request that carried the state.
//! Error *responses* reported by a stage are not errors here: they travel as
//! values through the response stream.

use std::fmt;

/// Result alias for handoff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the codec, configuration and handlers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or incomplete configuration at handler construction.
    #[error("invalid handler config: {0}")]
    Config(String),

    /// A stage broke the single-output contract of the context phase.
    #[error("{0}")]
    Protocol(ProtocolViolation),

    /// Malformed transport-encoded opaque state.
    #[error("malformed opaque state: {0}")]
    Decode(#[from] base64::DecodeError),

    /// A `disaggregated_params` mapping that does not have the params shape.
    #[error("malformed disaggregated params: {0}")]
    Json(#[from] serde_json::Error),

    /// Local generation failed.
    #[error("local generation failed: {0}")]
    Engine(anyhow::Error),

    /// The remote dispatch call failed.
    #[error("remote dispatch failed: {0}")]
    Remote(anyhow::Error),
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<ProtocolViolation> for Error {
    fn from(violation: ProtocolViolation) -> Self {
        Self::Protocol(violation)
    }
}

/// Ways a context phase can break its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// The context phase yielded a second response.
    MultipleContextOutputs,
    /// The context phase finished without yielding anything.
    MissingContextOutput,
    /// A successful context response did not carry `disaggregated_params`.
    MissingParams,
}

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleContextOutputs => {
                write!(f, "context phase produced more than one output")
            }
            Self::MissingContextOutput => write!(f, "context phase produced no output"),
            Self::MissingParams => {
                write!(f, "context output carries no disaggregated_params")
            }
        }
    }
}
