//! Request handlers for disaggregated prefill/decode serving.
//!
//! [`get_handler`] validates a [`HandlerConfig`] and builds one of three
//! roles: [`Aggregated`] (both phases locally), [`Prefill`] (context stage)
//! or [`Decode`] (generation stage). The disaggregated roles make at most one
//! remote call per request through the config's `NextClient`, carrying the
//! context state as `disaggregated_params`.

pub use {
    aggregated::Aggregated,
    config::HandlerConfig,
    decode::Decode,
    handler::{Handler, get_handler},
    prefill::Prefill,
};

mod aggregated;
mod config;
mod context;
mod decode;
mod handler;
mod prefill;
