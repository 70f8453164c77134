//! Request and response mapping tests.

use handoff_core::{
    Annotated, DISAGGREGATED_PARAMS, DisaggregatedParams, Error, Request, RequestType, Response,
};
use serde_json::json;

#[test]
fn request_is_a_plain_object() {
    let request = Request::try_from(json!({
        "token_ids": [1, 2, 3],
        "sampling_options": { "temperature": 0.0 },
    }))
    .unwrap();
    assert_eq!(request.get("token_ids"), Some(&json!([1, 2, 3])));
    assert!(request.disaggregated_params().is_none());
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "token_ids": [1, 2, 3], "sampling_options": { "temperature": 0.0 } })
    );
}

#[test]
fn non_object_is_rejected() {
    assert!(matches!(Request::try_from(json!([1, 2])), Err(Error::Json(_))));
}

#[test]
fn set_params_stores_wire_form() {
    let params = DisaggregatedParams::new(RequestType::ContextOnly)
        .ctx_request_id(3)
        .opaque_state(vec![1, 2, 3]);
    let mut response = Response::new();
    response.set_params(&params).unwrap();

    assert_eq!(
        response.get(DISAGGREGATED_PARAMS),
        Some(&json!({
            "request_type": "context_only",
            "ctx_request_id": 3,
            "first_gen_tokens": [],
            "opaque_state": "AQID",
        }))
    );
    assert_eq!(response.decoded_params().unwrap(), Some(params));
}

#[test]
fn copied_params_decode_on_the_request() {
    let params = DisaggregatedParams::new(RequestType::ContextOnly)
        .first_gen_tokens(vec![7])
        .opaque_state(b"handle".to_vec());
    let mut response = Response::new();
    response.set_params(&params).unwrap();

    let mut request = Request::new().with("token_ids", json!([5, 6]));
    request.set_disaggregated_params(response.disaggregated_params().unwrap().clone());

    let decoded = request.decoded_params().unwrap().unwrap();
    assert_eq!(decoded.opaque_state.as_deref(), Some(&b"handle"[..]));
    assert_eq!(decoded.first_gen_tokens, vec![7]);
}

#[test]
fn null_params_count_as_absent() {
    let request = Request::new().with(DISAGGREGATED_PARAMS, serde_json::Value::Null);
    assert!(request.disaggregated_params().is_none());
    assert!(request.decoded_params().unwrap().is_none());
}

#[test]
fn misshapen_params_are_json_error() {
    let request = Request::new().with(DISAGGREGATED_PARAMS, json!({ "opaque_state": 12 }));
    assert!(matches!(request.decoded_params(), Err(Error::Json(_))));
}

#[test]
fn malformed_state_is_decode_error() {
    let request = Request::new().with(
        DISAGGREGATED_PARAMS,
        json!({ "request_type": "generation_only", "opaque_state": "%%%" }),
    );
    assert!(matches!(request.decoded_params(), Err(Error::Decode(_))));
}

#[test]
fn error_responses() {
    let error = Response::try_from(json!({ "finish_reason": "error", "text": "oom" })).unwrap();
    let stop = Response::try_from(json!({ "finish_reason": "stop" })).unwrap();
    let partial = Response::try_from(json!({ "token_ids": [4] })).unwrap();
    assert!(error.is_error());
    assert!(!stop.is_error());
    assert!(!partial.is_error());
}

#[test]
fn annotated_exposes_data() {
    let wrapped: Annotated = serde_json::from_value(json!({
        "id": "7",
        "data": { "token_ids": [1] },
    }))
    .unwrap();
    assert_eq!(wrapped.id.as_deref(), Some("7"));
    assert_eq!(wrapped.data().get("token_ids"), Some(&json!([1])));
    assert_eq!(
        wrapped.into_data(),
        Response::try_from(json!({ "token_ids": [1] })).unwrap()
    );
}
