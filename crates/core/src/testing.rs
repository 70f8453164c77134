//! Scripted collaborators for tests.
//!
//! [`ScriptedEngine`] and [`ScriptedClient`] replay a fixed list of outputs,
//! record every request they receive and count how many outputs the consumer
//! actually pulled.

use crate::{Annotated, Engine, NextClient, Request, Response};
use anyhow::{Result, anyhow};
use futures_core::Stream;
use futures_util::{StreamExt, stream::BoxStream};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

type Script = Arc<Vec<std::result::Result<Response, String>>>;

#[derive(Clone, Default)]
struct Recorder {
    requests: Arc<Mutex<Vec<Request>>>,
    pulled: Arc<AtomicUsize>,
}

impl Recorder {
    fn replay(
        &self,
        request: Request,
        script: Script,
    ) -> impl Stream<Item = Result<Response>> + Send + 'static {
        self.requests.lock().push(request);
        let pulled = self.pulled.clone();
        async_stream::stream! {
            for step in script.iter() {
                pulled.fetch_add(1, Ordering::SeqCst);
                yield step.clone().map_err(|e| anyhow!(e));
            }
        }
    }
}

/// Engine that replays scripted responses.
#[derive(Clone)]
pub struct ScriptedEngine {
    script: Script,
    recorder: Recorder,
}

impl ScriptedEngine {
    /// Replay `responses` for every request.
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            script: Arc::new(responses.into_iter().map(Ok).collect()),
            recorder: Recorder::default(),
        }
    }

    /// Yield `responses`, then fail with `message`.
    pub fn failing_after(responses: Vec<Response>, message: &str) -> Self {
        let mut script: Vec<_> = responses.into_iter().map(Ok).collect();
        script.push(Err(message.to_owned()));
        Self {
            script: Arc::new(script),
            recorder: Recorder::default(),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.recorder.requests.lock().clone()
    }

    /// Number of `generate_locally` calls.
    pub fn calls(&self) -> usize {
        self.recorder.requests.lock().len()
    }

    /// Outputs pulled by consumers, across all calls.
    pub fn pulled(&self) -> usize {
        self.recorder.pulled.load(Ordering::SeqCst)
    }
}

impl Engine for ScriptedEngine {
    fn generate_locally(
        &self,
        request: Request,
    ) -> impl Stream<Item = Result<Response>> + Send + 'static {
        self.recorder.replay(request, self.script.clone())
    }
}

/// Next-hop client that replays scripted peer responses.
#[derive(Clone)]
pub struct ScriptedClient {
    script: Script,
    recorder: Recorder,
    refuse: bool,
}

impl ScriptedClient {
    /// Answer every call with `responses`.
    pub fn new(responses: Vec<Response>) -> Self {
        Self {
            script: Arc::new(responses.into_iter().map(Ok).collect()),
            recorder: Recorder::default(),
            refuse: false,
        }
    }

    /// A client whose calls fail before any stream is opened.
    pub fn unreachable() -> Self {
        Self {
            script: Arc::new(Vec::new()),
            recorder: Recorder::default(),
            refuse: true,
        }
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<Request> {
        self.recorder.requests.lock().clone()
    }

    /// Number of `round_robin` calls.
    pub fn calls(&self) -> usize {
        self.recorder.requests.lock().len()
    }

    /// Responses pulled by consumers, across all calls.
    pub fn pulled(&self) -> usize {
        self.recorder.pulled.load(Ordering::SeqCst)
    }
}

impl NextClient for ScriptedClient {
    type Stream = BoxStream<'static, Result<Annotated>>;

    async fn round_robin(&self, request: Request) -> Result<Self::Stream> {
        if self.refuse {
            self.recorder.requests.lock().push(request);
            return Err(anyhow!("no peer reachable"));
        }
        let stream = self.recorder.replay(request, self.script.clone());
        Ok(stream.map(|r| r.map(Annotated::new)).boxed())
    }
}
