//! Prefill handler: the context stage.

use crate::context::single_output;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use hcore::{
    DisaggregationStrategy, Engine, Error, NextClient, ProtocolViolation, Request, Response,
    Result,
};

/// Runs the context phase locally.
///
/// Under `prefill_first` it then hands the state to a decode peer and relays
/// the peer's stream. Under `decode_first` the decode worker called us, so
/// the single context response goes straight back to it.
#[derive(Clone)]
pub struct Prefill<E, C> {
    engine: E,
    strategy: DisaggregationStrategy,
    next: Option<C>,
}

impl<E: Engine, C: NextClient> Prefill<E, C> {
    pub(crate) fn new(engine: E, strategy: DisaggregationStrategy, next: Option<C>) -> Self {
        tracing::info!(
            mode = "prefill",
            %strategy,
            next_client = next.is_some(),
            "initialized prefill handler"
        );
        Self {
            engine,
            strategy,
            next,
        }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> DisaggregationStrategy {
        self.strategy
    }

    /// Run the context phase, then either relay the decode peer or return
    /// the context response.
    pub fn generate(
        &self,
        request: Request,
    ) -> impl Stream<Item = Result<Response>> + Send + use<E, C> {
        let this = self.clone();
        try_stream! {
            tracing::info!(strategy = %this.strategy, "prefill: processing context phase locally");
            // the engine gets its own copy, `request` is forwarded to the peer
            let local = this.engine.generate_locally(request.clone());
            let response = single_output(local, Error::Engine).await?;

            let is_error = this.engine.check_error(&response);
            tracing::info!(is_error, "prefill: context phase completed");

            if this.strategy == DisaggregationStrategy::PrefillFirst && !is_error {
                let params = response
                    .disaggregated_params()
                    .cloned()
                    .ok_or(ProtocolViolation::MissingParams)?;
                let next = this
                    .next
                    .as_ref()
                    .ok_or_else(|| Error::config("prefill_first requires a next client"))?;

                let mut request = request;
                request.set_disaggregated_params(params);
                tracing::debug!(
                    keys = ?request.keys().collect::<Vec<_>>(),
                    "prefill: sending request to decode worker"
                );

                let remote = next.round_robin(request).await.map_err(Error::Remote)?;
                let mut remote = std::pin::pin!(remote);
                let mut count = 0usize;
                while let Some(item) = remote.next().await {
                    count += 1;
                    tracing::debug!(count, "prefill: forwarding decode response");
                    yield item.map_err(Error::Remote)?.into_data();
                }
                tracing::info!(count, "prefill: remote decode completed");
            } else {
                if is_error {
                    tracing::warn!("prefill: context phase reported an error, skipping handoff");
                }
                yield response;
            }
        }
    }
}
