//! Local generation engine contract.

use crate::{Request, Response};
use anyhow::Result;
use futures_core::Stream;

/// The generation engine running on this worker.
///
/// Implementations clone whatever they need into the returned stream so it
/// outlives the borrow of `self`. Dropping the stream must cancel the
/// generation.
pub trait Engine: Clone + Send + Sync + 'static {
    /// Run generation for `request`, yielding responses as they are produced.
    fn generate_locally(
        &self,
        request: Request,
    ) -> impl Stream<Item = Result<Response>> + Send + 'static;

    /// Classify a response as an error terminal.
    fn check_error(&self, response: &Response) -> bool {
        response.is_error()
    }
}
