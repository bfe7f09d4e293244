use std::time::Duration;

use mentor_chat_core::renderer::{self, RenderQueue};
use mentor_chat_core::{
    ActorDeadError, ConcurrencyPolicy, Dispatcher, DispatcherBuilder,
};
use mentor_chat_model::ModelProvider;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    dispatcher_builder: DispatcherBuilder,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let dispatcher_builder = DispatcherBuilder::with_model_provider(provider);
        Self { dispatcher_builder }
    }

    /// Replaces the mentor persona with another system prompt.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.dispatcher_builder =
            self.dispatcher_builder.with_system_prompt(prompt);
        self
    }

    /// Sets how a message sent while a reply is still rendering is run.
    #[inline]
    pub fn with_concurrency_policy(mut self, policy: ConcurrencyPolicy) -> Self {
        self.dispatcher_builder =
            self.dispatcher_builder.with_concurrency_policy(policy);
        self
    }

    /// Sets the pause after each rendered word.
    #[inline]
    pub fn with_token_delay(mut self, delay: Duration) -> Self {
        self.dispatcher_builder = self.dispatcher_builder.with_token_delay(delay);
        self
    }

    /// Attaches a callback to be invoked when no reply is pending.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.dispatcher_builder = self.dispatcher_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session, returning it together with the queue the
    /// window drains to update its transcript.
    ///
    /// Must be called within a tokio runtime.
    pub fn build(self) -> (Session, RenderQueue) {
        let (renderer, render_queue) = renderer::channel();
        let dispatcher = self.dispatcher_builder.build(renderer);
        (Session { dispatcher }, render_queue)
    }
}

/// A chat session with the mentor.
///
/// Every message is answered on its own: previous turns are never sent
/// back to the model.
pub struct Session {
    dispatcher: Dispatcher,
}

impl Session {
    /// Sends a message to the session. Returns immediately.
    #[inline]
    pub fn send_message(&self, message: &str) -> Result<(), ActorDeadError> {
        self.dispatcher.submit_turn(message)
    }
}
