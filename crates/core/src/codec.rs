//! Opaque-state codec for disaggregated params.
//!
//! The opaque state is an engine-defined binary blob. Peers exchange requests
//! over a text-oriented channel, so the blob travels as standard padded
//! base64. Every other field passes through untouched.

use crate::{DisaggregatedParams, Result, WireParams};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::Value;

/// Encode params for network transfer.
pub fn encode(params: &DisaggregatedParams) -> WireParams {
    let state = params.opaque_state.as_deref().map(|raw| STANDARD.encode(raw));
    tracing::debug!(
        request_type = ?params.request_type,
        ctx_request_id = ?params.ctx_request_id,
        raw_bytes = params.opaque_state.as_ref().map_or(0, Vec::len),
        encoded_chars = state.as_ref().map_or(0, String::len),
        "encoded disaggregated params"
    );
    params.with_state(state)
}

/// Decode params received from a peer.
///
/// The encoded state is untrusted once it has crossed the wire: malformed
/// base64 fails with [`crate::Error::Decode`].
pub fn decode(params: &WireParams) -> Result<DisaggregatedParams> {
    let state = params
        .opaque_state
        .as_deref()
        .map(|text| STANDARD.decode(text))
        .transpose()?;
    tracing::debug!(
        request_type = ?params.request_type,
        ctx_request_id = ?params.ctx_request_id,
        encoded_chars = params.opaque_state.as_ref().map_or(0, String::len),
        raw_bytes = state.as_ref().map_or(0, Vec::len),
        "decoded disaggregated params"
    );
    Ok(params.with_state(state))
}

/// [`encode`] lifted over an optional input.
pub fn encode_opt(params: Option<&DisaggregatedParams>) -> Option<WireParams> {
    if params.is_none() {
        tracing::debug!("encode: no disaggregated params");
    }
    params.map(encode)
}

/// [`decode`] lifted over an optional input.
pub fn decode_opt(params: Option<&WireParams>) -> Result<Option<DisaggregatedParams>> {
    if params.is_none() {
        tracing::debug!("decode: no disaggregated params");
    }
    params.map(decode).transpose()
}

/// Check the opaque state of a raw `disaggregated_params` mapping received
/// from a peer, returning its decoded size.
///
/// Only `opaque_state` is inspected. The remaining fields belong to the
/// engine and may have any shape. A null or missing state is `None`; a state
/// that is not a string fails with [`crate::Error::Json`] and bad base64 with
/// [`crate::Error::Decode`].
pub fn check_state(params: &Value) -> Result<Option<usize>> {
    let Some(state) = params.get("opaque_state").filter(|v| !v.is_null()) else {
        return Ok(None);
    };
    let text = <&str>::deserialize(state)?;
    Ok(Some(STANDARD.decode(text)?.len()))
}
