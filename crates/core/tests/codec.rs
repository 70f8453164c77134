//! Opaque-state codec tests.

use handoff_core::{DisaggregatedParams, Error, RequestType, WireParams, codec};

fn context_params() -> DisaggregatedParams {
    DisaggregatedParams::new(RequestType::ContextOnly)
        .ctx_request_id(42)
        .first_gen_tokens(vec![128_000, 9906])
        .draft_tokens(vec![11, 12])
}

#[test]
fn encode_produces_base64_text() {
    let params = context_params().opaque_state(vec![0x01, 0x02, 0x03, 0xff]);
    let wire = codec::encode(&params);
    assert_eq!(wire.opaque_state.as_deref(), Some("AQID/w=="));
}

#[test]
fn roundtrip_restores_state() {
    let blobs: [&[u8]; 4] = [b"", b"\0", b"kv-cache-handle", &[0xde, 0xad, 0xbe, 0xef, 0x00, 0x7f]];
    for blob in blobs {
        let params = context_params().opaque_state(blob.to_vec());
        let decoded = codec::decode(&codec::encode(&params)).unwrap();
        assert_eq!(decoded.opaque_state.as_deref(), Some(blob));
    }
}

#[test]
fn passthrough_fields_untouched() {
    let params = context_params().opaque_state(vec![9; 64]);
    let wire = codec::encode(&params);
    assert_eq!(wire.request_type, params.request_type);
    assert_eq!(wire.ctx_request_id, params.ctx_request_id);
    assert_eq!(wire.first_gen_tokens, params.first_gen_tokens);
    assert_eq!(wire.draft_tokens, params.draft_tokens);

    let decoded = codec::decode(&wire).unwrap();
    assert_eq!(decoded, params);
}

#[test]
fn absent_state_stays_absent() {
    let params = context_params();
    let wire = codec::encode(&params);
    assert!(wire.opaque_state.is_none());
    assert_eq!(codec::decode(&wire).unwrap(), params);
}

#[test]
fn absent_params_pass_through() {
    assert!(codec::encode_opt(None).is_none());
    assert!(codec::decode_opt(None).unwrap().is_none());

    let params = context_params().opaque_state(b"abc".to_vec());
    let wire = codec::encode_opt(Some(&params)).unwrap();
    let decoded = codec::decode_opt(Some(&wire)).unwrap().unwrap();
    assert_eq!(decoded, params);
}

#[test]
fn encode_leaves_input_intact() {
    let params = context_params().opaque_state(b"state".to_vec());
    let before = params.clone();
    let _ = codec::encode(&params);
    assert_eq!(params, before);
}

#[test]
fn malformed_base64_is_decode_error() {
    let wire = WireParams::new(RequestType::GenerationOnly).opaque_state("not*base64!".into());
    let err = codec::decode(&wire).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn truncated_base64_is_decode_error() {
    let wire = WireParams::new(RequestType::GenerationOnly).opaque_state("AQID/w=".into());
    assert!(matches!(codec::decode(&wire), Err(Error::Decode(_))));
}

#[test]
fn wire_params_serialize_as_plain_mapping() {
    let wire = codec::encode(&context_params().opaque_state(vec![1, 2, 3]));
    let value = serde_json::to_value(&wire).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "request_type": "context_only",
            "ctx_request_id": 42,
            "first_gen_tokens": [128000, 9906],
            "draft_tokens": [11, 12],
            "opaque_state": "AQID",
        })
    );
}

#[test]
fn check_state_ignores_other_fields() {
    let params = serde_json::json!({
        "first_gen_tokens": null,
        "ctx_request_id": "req-1",
        "opaque_state": "AQID/w==",
    });
    assert_eq!(codec::check_state(&params).unwrap(), Some(4));

    let stateless = serde_json::json!({ "request_type": "context_only", "opaque_state": null });
    assert_eq!(codec::check_state(&stateless).unwrap(), None);
    assert_eq!(codec::check_state(&serde_json::json!({})).unwrap(), None);
}

#[test]
fn check_state_rejects_bad_state() {
    let bad = serde_json::json!({ "opaque_state": "@@" });
    assert!(matches!(codec::check_state(&bad), Err(Error::Decode(_))));

    let wrong_type = serde_json::json!({ "opaque_state": 7 });
    assert!(matches!(codec::check_state(&wrong_type), Err(Error::Json(_))));
}
