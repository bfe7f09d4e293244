use std::time::Duration;

use mentor_chat_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// What the fake model answers to one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PresetOutcome {
    /// Reply with this text.
    Reply(String),
    /// Fail with an error of this kind.
    Failure(ErrorKind),
}

/// A scripted answer, optionally held back for a while.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetResponse {
    /// The outcome of the request.
    pub outcome: PresetOutcome,
    /// Overrides the provider-wide delay for this answer.
    pub delay: Option<Duration>,
}

impl PresetResponse {
    /// Creates a successful answer with the given text.
    #[inline]
    pub fn with_reply<S: Into<String>>(text: S) -> Self {
        Self {
            outcome: PresetOutcome::Reply(text.into()),
            delay: None,
        }
    }

    /// Creates a failing answer.
    #[inline]
    pub fn with_failure(kind: ErrorKind) -> Self {
        Self {
            outcome: PresetOutcome::Failure(kind),
            delay: None,
        }
    }

    /// Holds the answer back for `delay` before resolving.
    #[inline]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}
