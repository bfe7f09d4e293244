//! A small actor runtime on top of tokio.
//!
//! Each actor owns its state on a dedicated task and processes the
//! messages posted to its mailbox strictly one after another.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod macros;
mod message;
mod runtime;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use message::Message;
