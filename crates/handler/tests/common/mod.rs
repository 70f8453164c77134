//! Shared fixtures for handler tests.
#![allow(dead_code)]

use futures_core::Stream;
use futures_util::StreamExt;
use hcore::{DisaggregatedParams, Error, Request, RequestType, Response};
use serde_json::{Value, json};

pub fn response(value: Value) -> Response {
    Response::try_from(value).unwrap()
}

pub fn request() -> Request {
    Request::try_from(json!({
        "token_ids": [128000, 791, 6864, 315, 9822, 374],
        "stop_conditions": { "max_tokens": 16 },
    }))
    .unwrap()
}

/// Context-phase output carrying encoded disaggregated params.
pub fn context_response(ctx_request_id: u64, state: &[u8]) -> Response {
    let params = DisaggregatedParams::new(RequestType::ContextOnly)
        .ctx_request_id(ctx_request_id)
        .first_gen_tokens(vec![12366])
        .opaque_state(state.to_vec());
    let mut response = response(json!({ "token_ids": [12366], "finish_reason": "stop" }));
    response.set_params(&params).unwrap();
    response
}

pub fn error_response() -> Response {
    response(json!({ "finish_reason": "error", "text": "context phase failed" }))
}

/// `n` single-token generation responses.
pub fn tokens(n: usize) -> Vec<Response> {
    (0..n)
        .map(|i| response(json!({ "token_ids": [1000 + i], "index": i })))
        .collect()
}

pub async fn collect(
    stream: impl Stream<Item = Result<Response, Error>>,
) -> Vec<Result<Response, Error>> {
    stream.collect().await
}

/// Collect a stream that must succeed.
pub async fn collect_ok(stream: impl Stream<Item = Result<Response, Error>>) -> Vec<Response> {
    collect(stream)
        .await
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap()
}
