//! Aggregated handler: both phases on this worker.

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use hcore::{Engine, Error, Request, Response, Result};

/// Runs context and generation locally and forwards the engine output.
#[derive(Clone)]
pub struct Aggregated<E> {
    engine: E,
}

impl<E: Engine> Aggregated<E> {
    pub(crate) fn new(engine: E) -> Self {
        tracing::info!(mode = "prefill_and_decode", "initialized aggregated handler");
        Self { engine }
    }

    /// Forward the local generation stream unchanged.
    pub fn generate(
        &self,
        request: Request,
    ) -> impl Stream<Item = Result<Response>> + Send + use<E> {
        let engine = self.engine.clone();
        try_stream! {
            tracing::debug!("aggregated: processing both phases locally");
            let mut local = std::pin::pin!(engine.generate_locally(request));
            while let Some(response) = local.next().await {
                yield response.map_err(Error::Engine)?;
            }
        }
    }
}
