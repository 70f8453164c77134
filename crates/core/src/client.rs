//! Remote dispatch to the peer worker pool.

use crate::{Request, Response};
use anyhow::{Result, bail};
use futures_core::Stream;
use serde::{Deserialize, Serialize};

/// A response received from a peer, as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotated {
    /// Transport-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Transport event tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// The response mapping.
    #[serde(default)]
    pub data: Response,
}

impl Annotated {
    /// Wrap a response.
    pub fn new(data: Response) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// The mapping form of the response.
    pub fn data(&self) -> &Response {
        &self.data
    }

    /// Take the mapping form of the response.
    pub fn into_data(self) -> Response {
        self.data
    }
}

impl From<Response> for Annotated {
    fn from(data: Response) -> Self {
        Self::new(data)
    }
}

/// Round-robin dispatch to a pool of peer workers.
///
/// Must be safe for concurrent use: one client serves every in-flight
/// request of a handler.
pub trait NextClient: Clone + Send + Sync + 'static {
    /// The response stream of one remote call. Dropping it releases the call.
    type Stream: Stream<Item = Result<Annotated>> + Send + 'static;

    /// Send `request` to the next peer in rotation.
    fn round_robin(&self, request: Request) -> impl Future<Output = Result<Self::Stream>> + Send;
}

/// `()` as the absent peer: every call fails.
impl NextClient for () {
    type Stream = futures_util::stream::Empty<Result<Annotated>>;

    async fn round_robin(&self, _request: Request) -> Result<Self::Stream> {
        bail!("no next client configured")
    }
}
