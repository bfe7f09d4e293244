//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use mentor_chat_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    responses: VecDeque<PresetResponse>,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Responses are handed out in the order they were added, one per
/// request, no matter what the request contains. Once the script runs
/// out, requests fail with [`ErrorKind::Other`]. Every request is
/// recorded so tests can inspect the prompts that were sent.
///
/// Clones share the same script.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_response(&mut self, preset: PresetResponse) {
        self.script().responses.push_back(preset);
    }

    #[inline]
    pub fn add_reply<S: Into<String>>(&mut self, text: S) {
        self.add_response(PresetResponse::with_reply(text));
    }

    #[inline]
    pub fn add_failure(&mut self, kind: ErrorKind) {
        self.add_response(PresetResponse::with_failure(kind));
    }

    /// Sets the delay applied to answers without their own delay.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.script().requests.clone()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let preset = {
            let mut script = self.script();
            script.requests.push(req.clone());
            script.responses.pop_front()
        };
        let default_delay = self.delay;

        async move {
            let Some(preset) = preset else {
                return Err(Error {
                    message: "no more scripted responses",
                    kind: ErrorKind::Other,
                });
            };
            if let Some(delay) = preset.delay.or(default_delay) {
                sleep(delay).await;
            }
            match preset.outcome {
                PresetOutcome::Reply(text) => Ok(ModelResponse::with_content(text)),
                PresetOutcome::Failure(kind) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
            }
        }
    }
}
