//! Context-phase output collection.

use futures_core::Stream;
use futures_util::StreamExt;
use hcore::{Error, ProtocolViolation, Response, Result};
use std::pin::pin;

/// Drain a context-phase stream, requiring exactly one response.
///
/// Fails as soon as a second response arrives; the stream is dropped at that
/// point. `wrap` classifies collaborator failures.
pub(crate) async fn single_output<S>(
    stream: S,
    wrap: fn(anyhow::Error) -> Error,
) -> Result<Response>
where
    S: Stream<Item = anyhow::Result<Response>>,
{
    let mut stream = pin!(stream);
    let mut output = None;
    while let Some(item) = stream.next().await {
        let response = item.map_err(wrap)?;
        if output.is_some() {
            tracing::error!("context phase produced more than one output");
            return Err(ProtocolViolation::MultipleContextOutputs.into());
        }
        output = Some(response);
    }

    output.ok_or_else(|| {
        tracing::error!("context phase produced no output");
        ProtocolViolation::MissingContextOutput.into()
    })
}
