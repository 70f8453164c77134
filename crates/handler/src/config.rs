//! Handler configuration bound to live collaborators.

use hcore::{
    DisaggregationMode, DisaggregationStrategy, Result, Route, WorkerConfig, config::validate,
};

/// Static configuration of one handler: mode, strategy, the local engine and
/// the optional next-hop client.
///
/// `C` defaults to `()`, the absent peer, for workers that never call one.
#[derive(Clone)]
pub struct HandlerConfig<E, C = ()> {
    /// Phases run by this worker.
    pub disaggregation_mode: DisaggregationMode,
    /// Handoff direction.
    pub disaggregation_strategy: DisaggregationStrategy,
    /// Local generation engine.
    pub engine: E,
    /// Peer dispatch client.
    pub next_client: Option<C>,
}

impl<E> HandlerConfig<E> {
    /// Create a config without a next client.
    pub fn new(mode: DisaggregationMode, strategy: DisaggregationStrategy, engine: E) -> Self {
        Self {
            disaggregation_mode: mode,
            disaggregation_strategy: strategy,
            engine,
            next_client: None,
        }
    }

    /// Attach a next client.
    pub fn next_client<C>(self, client: C) -> HandlerConfig<E, C> {
        HandlerConfig {
            disaggregation_mode: self.disaggregation_mode,
            disaggregation_strategy: self.disaggregation_strategy,
            engine: self.engine,
            next_client: Some(client),
        }
    }
}

impl<E, C> HandlerConfig<E, C> {
    /// Bind a file config to collaborators.
    ///
    /// `next` should be a client for `worker.next_endpoint`; it is kept even
    /// when the routing plan never uses it.
    pub fn from_worker(worker: &WorkerConfig, engine: E, next: Option<C>) -> Self {
        Self {
            disaggregation_mode: worker.disaggregation_mode,
            disaggregation_strategy: worker.disaggregation_strategy,
            engine,
            next_client: next,
        }
    }

    /// Fail with a config error if an initiating worker has no peer.
    pub fn validate(&self) -> Result<()> {
        validate(
            self.disaggregation_mode,
            self.disaggregation_strategy,
            self.next_client.is_some(),
        )
    }

    /// Routing plan of this config.
    pub fn route(&self) -> Route {
        Route::of(self.disaggregation_mode, self.disaggregation_strategy)
    }
}
