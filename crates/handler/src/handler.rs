//! Handler enum and factory.

use crate::{Aggregated, Decode, HandlerConfig, Prefill};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use hcore::{
    DisaggregationMode, DisaggregationStrategy, Engine, NextClient, Request, Response, Result,
    Route,
};

/// Request handler with enum dispatch over the three worker roles.
///
/// Holds read-only configuration and cheaply cloned collaborators, so one
/// handler serves any number of concurrent requests.
#[derive(Clone)]
pub enum Handler<E, C = ()> {
    /// Both phases locally.
    Aggregated(Aggregated<E>),
    /// Context phase.
    Prefill(Prefill<E, C>),
    /// Generation phase.
    Decode(Decode<E, C>),
}

/// Validate `config` and construct the handler for its mode.
pub fn get_handler<E: Engine, C: NextClient>(config: HandlerConfig<E, C>) -> Result<Handler<E, C>> {
    config.validate()?;
    let HandlerConfig {
        disaggregation_mode,
        disaggregation_strategy,
        engine,
        next_client,
    } = config;

    let handler = match disaggregation_mode {
        DisaggregationMode::PrefillAndDecode => Handler::Aggregated(Aggregated::new(engine)),
        DisaggregationMode::Prefill => Handler::Prefill(Prefill::new(
            engine,
            disaggregation_strategy,
            next_client,
        )),
        DisaggregationMode::Decode => Handler::Decode(Decode::new(
            engine,
            disaggregation_strategy,
            next_client,
        )),
    };
    Ok(handler)
}

impl<E: Engine, C: NextClient> Handler<E, C> {
    /// Handle one request, streaming responses to the caller.
    ///
    /// The stream is lazy and owns everything it needs. Dropping it cancels
    /// local generation and any in-flight remote call.
    pub fn generate(
        &self,
        request: Request,
    ) -> impl Stream<Item = Result<Response>> + Send + use<E, C> {
        let this = self.clone();
        try_stream! {
            match this {
                Handler::Aggregated(h) => {
                    let mut stream = std::pin::pin!(h.generate(request));
                    while let Some(response) = stream.next().await {
                        yield response?;
                    }
                }
                Handler::Prefill(h) => {
                    let mut stream = std::pin::pin!(h.generate(request));
                    while let Some(response) = stream.next().await {
                        yield response?;
                    }
                }
                Handler::Decode(h) => {
                    let mut stream = std::pin::pin!(h.generate(request));
                    while let Some(response) = stream.next().await {
                        yield response?;
                    }
                }
            }
        }
    }

    /// The mode this handler was built for.
    pub fn mode(&self) -> DisaggregationMode {
        match self {
            Self::Aggregated(_) => DisaggregationMode::PrefillAndDecode,
            Self::Prefill(_) => DisaggregationMode::Prefill,
            Self::Decode(_) => DisaggregationMode::Decode,
        }
    }

    /// The configured strategy, `None` for the aggregated handler.
    pub fn strategy(&self) -> Option<DisaggregationStrategy> {
        match self {
            Self::Aggregated(_) => None,
            Self::Prefill(h) => Some(h.strategy()),
            Self::Decode(h) => Some(h.strategy()),
        }
    }

    /// Routing plan of this handler.
    pub fn route(&self) -> Route {
        Route::of(self.mode(), self.strategy().unwrap_or_default())
    }
}
