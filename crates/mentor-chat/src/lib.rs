//! A terminal chat window that puts a friendly Python mentor one keystroke
//! away.
//!
//! The crate includes a binary that runs the window full screen. The
//! window, its session and its drawing code are also usable as a library.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod app;
mod config;
mod session;
pub mod terminal;
mod theme;
pub mod ui;

pub use app::{App, InputField, TranscriptPane};
pub use config::{
    API_KEY_VAR, BASE_URL_VAR, ChatConfig, ConfigError, ENV_FILE_NAME,
    MODEL_VAR,
};
pub use session::{Session, SessionBuilder};

/// Re-exports of [`mentor_chat_core`] crate.
pub mod core {
    pub use mentor_chat_core::*;
}
