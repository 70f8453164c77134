//! Aggregated handler tests.

mod common;

use common::{collect, collect_ok, request, tokens};
use futures_util::StreamExt;
use handoff_handler::{HandlerConfig, get_handler};
use hcore::{
    DisaggregationMode, DisaggregationStrategy, Error,
    testing::ScriptedEngine,
};

fn aggregated(engine: ScriptedEngine) -> handoff_handler::Handler<ScriptedEngine> {
    get_handler(HandlerConfig::new(
        DisaggregationMode::PrefillAndDecode,
        DisaggregationStrategy::DecodeFirst,
        engine,
    ))
    .unwrap()
}

#[tokio::test]
async fn forwards_local_generation_unchanged() {
    for n in [0, 1, 5] {
        let expected = tokens(n);
        let engine = ScriptedEngine::new(expected.clone());
        let handler = aggregated(engine.clone());

        let out = collect_ok(handler.generate(request())).await;
        assert_eq!(out, expected, "n = {n}");
        assert_eq!(engine.calls(), 1);
        assert_eq!(engine.requests()[0], request());
    }
}

#[tokio::test]
async fn engine_failure_ends_the_stream() {
    let engine = ScriptedEngine::failing_after(tokens(2), "device lost");
    let handler = aggregated(engine);

    let out = collect(handler.generate(request())).await;
    assert_eq!(out.len(), 3);
    assert!(out[..2].iter().all(Result::is_ok));
    match &out[2] {
        Err(Error::Engine(e)) => assert!(e.to_string().contains("device lost")),
        other => panic!("unexpected item: {other:?}"),
    }
}

#[tokio::test]
async fn generation_is_pulled_lazily() {
    let engine = ScriptedEngine::new(tokens(5));
    let handler = aggregated(engine.clone());

    let stream = handler.generate(request());
    assert_eq!(engine.calls(), 0);

    let first: Vec<_> = stream.take(2).collect().await;
    assert_eq!(first.len(), 2);
    assert_eq!(engine.pulled(), 2);
}
