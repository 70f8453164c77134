//! Core types and contracts for handoff, the disaggregated prefill/decode
//! request router.
//!
//! Provides [`DisaggregatedParams`] and its opaque-state [`codec`], the
//! [`Request`]/[`Response`] mappings, worker configuration, and the two
//! collaborator contracts a handler drives: the local [`Engine`] and the
//! round-robin [`NextClient`].

pub use {
    client::{Annotated, NextClient},
    config::{
        DisaggregationMode, DisaggregationStrategy, RemoteCall, Route, WorkerConfig,
        expand_env_vars,
    },
    engine::Engine,
    error::{Error, ProtocolViolation, Result},
    message::{DISAGGREGATED_PARAMS, FINISH_REASON, Request, Response},
    params::{DisaggregatedParams, RequestType, WireParams},
};

mod client;
pub mod codec;
pub mod config;
mod engine;
mod error;
mod message;
mod params;
#[cfg(feature = "testing")]
pub mod testing;
