//! Decode handler: the generation stage.

use crate::context::single_output;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use hcore::{
    Annotated, DisaggregationStrategy, Engine, Error, NextClient, ProtocolViolation, Request,
    Response, Result, codec,
};

/// Runs the generation phase locally from a handed-off state.
///
/// Under `decode_first` it first asks a prefill peer for the context state.
/// Under `prefill_first` the state already rides on the incoming request.
#[derive(Clone)]
pub struct Decode<E, C> {
    engine: E,
    strategy: DisaggregationStrategy,
    next: Option<C>,
}

impl<E: Engine, C: NextClient> Decode<E, C> {
    pub(crate) fn new(engine: E, strategy: DisaggregationStrategy, next: Option<C>) -> Self {
        tracing::info!(
            mode = "decode",
            %strategy,
            next_client = next.is_some(),
            "initialized decode handler"
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

    /// Obtain the context state if this worker initiates, then generate.
    pub fn generate(
        &self,
        request: Request,
    ) -> impl Stream<Item = Result<Response>> + Send + use<E, C> {
        let this = self.clone();
        try_stream! {
            let mut request = request;
            tracing::info!(strategy = %this.strategy, "decode: handling request");

            if this.strategy == DisaggregationStrategy::DecodeFirst {
                let next = this
                    .next
                    .as_ref()
                    .ok_or_else(|| Error::config("decode_first requires a next client"))?;

                tracing::debug!("decode: requesting context phase from prefill worker");
                let remote = next
                    .round_robin(request.clone())
                    .await
                    .map_err(Error::Remote)?;
                let remote = remote.map(|item| item.map(Annotated::into_data));
                let response = single_output(remote, Error::Remote).await?;

                if this.engine.check_error(&response) {
                    tracing::error!(
                        "decode: prefill worker returned an error, forwarding to client"
                    );
                    yield response;
                    return;
                }

                let params = response
                    .disaggregated_params()
                    .cloned()
                    .ok_or(ProtocolViolation::MissingParams)?;
                request.set_disaggregated_params(params);
            }

            match request.disaggregated_params() {
                Some(params) => {
                    // malformed state fails this request before the engine sees it
                    let state_bytes = codec::check_state(params)?;
                    tracing::info!(
                        ctx_request_id = ?params.get("ctx_request_id"),
                        ?state_bytes,
                        "decode: generating from transferred state"
                    );
                }
                None => tracing::warn!("decode: request carries no disaggregated_params"),
            }

            let mut local = std::pin::pin!(this.engine.generate_locally(request));
            while let Some(response) = local.next().await {
                yield response.map_err(Error::Engine)?;
            }
        }
    }
}
