mod builder;
mod state;
mod worker;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use mentor_chat_actor::{ActorDeadError, define_actor};
use tokio::task::JoinHandle;

use crate::model_client::ModelClient;
use crate::renderer::Renderer;
pub use builder::DispatcherBuilder;
use state::SubmitTurn;
pub use worker::stream_reply;

/// Pause after each non-whitespace token while rendering a reply.
pub const DEFAULT_TOKEN_DELAY: Duration = Duration::from_millis(3);

/// How turns submitted while another turn is still rendering are run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// One worker at a time. Later turns wait in submission order.
    ///
    /// This keeps replies apart from each other only. The user line of a
    /// later submission is shown as soon as it is submitted, so it can
    /// land in the middle of a reply that is still being rendered.
    #[default]
    Serialized,
    /// Every turn gets its own worker right away. Replies of overlapping
    /// turns may interleave in the transcript.
    Unbounded,
}

/// Per-turn parameters, copied into every worker.
#[derive(Clone, Debug)]
struct TurnSettings {
    system_prompt: Arc<str>,
    temperature: f32,
    token_delay: Duration,
}

define_actor! {
    /// Runs turns: takes submitted user text, asks the model for a reply
    /// on a worker task and feeds the reply to the transcript renderer.
    ///
    /// Submitting never blocks. Whether a new turn starts immediately
    /// or waits for the previous one is decided by the
    /// [`ConcurrencyPolicy`]. A started turn cannot be cancelled.
    #[wrapper_type(Dispatcher)]
    pub struct DispatcherState {
        model_client: ModelClient,
        renderer: Renderer,
        settings: TurnSettings,
        policy: ConcurrencyPolicy,
        pending_turns: VecDeque<String>,
        running_workers: HashMap<u64, JoinHandle<()>>,
        next_worker_id: u64,

        on_idle: Option<Box<dyn Fn() + Send + Sync>>,
    }
}

impl Dispatcher {
    /// Submits the text of a new turn.
    ///
    /// Text that is empty after trimming is ignored. The text itself is
    /// sent to the model verbatim.
    pub fn submit_turn<S: Into<String>>(&self, text: S) -> Result<(), ActorDeadError> {
        self.handle().send(SubmitTurn(text.into()))
    }
}

impl Dispatcher {
    fn spawn_from_builder(builder: DispatcherBuilder, renderer: Renderer) -> Self {
        let DispatcherBuilder {
            model_client,
            system_prompt,
            temperature,
            token_delay,
            policy,
            on_idle,
        } = builder;

        let state = DispatcherState {
            model_client,
            renderer,
            settings: TurnSettings {
                system_prompt: system_prompt.into(),
                temperature,
                token_delay,
            },
            policy,
            pending_turns: Default::default(),
            running_workers: Default::default(),
            next_worker_id: 1,
            on_idle,
        };
        Self::spawn(state, Some("dispatcher"))
    }
}
