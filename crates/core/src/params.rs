//! Disaggregation metadata handed from the context phase to the generation
//! phase.

use serde::{Deserialize, Serialize};

/// Phase marker carried by [`DisaggregatedParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Run the context phase only and hand off the state.
    ContextOnly,
    /// Run the generation phase from a handed-off state.
    GenerationOnly,
    /// Run both phases in one place.
    ContextAndGeneration,
}

/// Parameters threaded between the prefill and decode workers.
///
/// `S` is the representation of the opaque state. Before transport it is the
/// native binary blob ([`DisaggregatedParams`]); after [`crate::codec::encode`]
/// it is base64 text ([`WireParams`]). The two forms are different types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisaggregatedParams<S = Vec<u8>> {
    /// Phase marker.
    pub request_type: RequestType,

    /// Correlation id of the context request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctx_request_id: Option<u64>,

    /// Tokens produced by the context phase.
    #[serde(default)]
    pub first_gen_tokens: Vec<u32>,

    /// Speculative draft tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_tokens: Option<Vec<u32>>,

    /// Engine-defined cache/session handle.
    #[serde(default)]
    pub opaque_state: Option<S>,
}

/// Transport form of [`DisaggregatedParams`], with the opaque state as
/// base64 text.
pub type WireParams = DisaggregatedParams<String>;

impl<S> DisaggregatedParams<S> {
    /// Create params of the given phase with no tokens and no state.
    pub fn new(request_type: RequestType) -> Self {
        Self {
            request_type,
            ctx_request_id: None,
            first_gen_tokens: Vec::new(),
            draft_tokens: None,
            opaque_state: None,
        }
    }

    /// Set the context request id.
    pub fn ctx_request_id(mut self, id: u64) -> Self {
        self.ctx_request_id = Some(id);
        self
    }

    /// Set the first generated tokens.
    pub fn first_gen_tokens(mut self, tokens: Vec<u32>) -> Self {
        self.first_gen_tokens = tokens;
        self
    }

    /// Set the draft tokens.
    pub fn draft_tokens(mut self, tokens: Vec<u32>) -> Self {
        self.draft_tokens = Some(tokens);
        self
    }

    /// Set the opaque state.
    pub fn opaque_state(mut self, state: S) -> Self {
        self.opaque_state = Some(state);
        self
    }

    /// Copy every field except the state, replacing it with `state`.
    pub(crate) fn with_state<T>(&self, state: Option<T>) -> DisaggregatedParams<T> {
        DisaggregatedParams {
            request_type: self.request_type,
            ctx_request_id: self.ctx_request_id,
            first_gen_tokens: self.first_gen_tokens.clone(),
            draft_tokens: self.draft_tokens.clone(),
            opaque_state: state,
        }
    }
}
