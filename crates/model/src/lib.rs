//! Provider-agnostic types for talking to a chat completion model.
//!
//! The types here only describe the shape of a request and its reply.
//! Concrete providers (a hosted API, a scripted fake) implement
//! [`ModelProvider`] in their own crates.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
