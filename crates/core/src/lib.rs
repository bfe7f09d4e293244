//! Core logic of the mentor chat: prompts, the turn dispatcher and the
//! message protocol between turn workers and the transcript surface.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod dispatcher;
mod model_client;
pub mod prompt;
pub mod renderer;
pub mod tokenize;
pub mod transcript;

pub use dispatcher::{
    ConcurrencyPolicy, DEFAULT_TOKEN_DELAY, Dispatcher, DispatcherBuilder,
    stream_reply,
};
pub use mentor_chat_actor::ActorDeadError;
