use std::time::Duration;

use mentor_chat_model::ModelProvider;

use super::{ConcurrencyPolicy, DEFAULT_TOKEN_DELAY, Dispatcher};
use crate::model_client::ModelClient;
use crate::prompt::{DEFAULT_TEMPERATURE, MENTOR_PERSONA};
use crate::renderer::Renderer;

/// [`Dispatcher`] builder.
///
/// Defaults to the mentor persona, a temperature of 0.3, a 3 ms token
/// delay and [`ConcurrencyPolicy::Serialized`].
pub struct DispatcherBuilder {
    pub(super) model_client: ModelClient,
    pub(super) system_prompt: String,
    pub(super) temperature: f32,
    pub(super) token_delay: Duration,
    pub(super) policy: ConcurrencyPolicy,
    pub(super) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl DispatcherBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(provider: P) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            system_prompt: MENTOR_PERSONA.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            token_delay: DEFAULT_TOKEN_DELAY,
            policy: ConcurrencyPolicy::default(),
            on_idle: None,
        }
    }

    /// Replaces the system prompt sent with every turn.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Sets the sampling temperature.
    #[inline]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the pause after each non-whitespace token.
    #[inline]
    pub fn with_token_delay(mut self, delay: Duration) -> Self {
        self.token_delay = delay;
        self
    }

    /// Sets how overlapping turns are run.
    #[inline]
    pub fn with_concurrency_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attaches a callback invoked whenever the last running turn has
    /// finished and nothing is queued.
    #[inline]
    pub fn on_idle(mut self, on_idle: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Spawns the dispatcher. Must be called within a tokio runtime.
    #[inline]
    pub fn build(self, renderer: Renderer) -> Dispatcher {
        Dispatcher::spawn_from_builder(self, renderer)
    }
}
