use std::fmt::Debug;

use crate::Actor;

/// A message that an actor with state `S` knows how to handle.
///
/// Handlers run on the actor's own task, one at a time, so they get
/// exclusive access to the state without any locking.
pub trait Message<S>: Send + Debug + 'static {
    /// Handles the message with mutable access to the actor's state.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

/// Object-safe form of [`Message`] used for the mailbox queue.
pub(crate) trait Envelope<S>: Send + Debug + 'static {
    fn deliver(self: Box<Self>, state: &mut S, handle: &Actor<S>);
}

impl<S, M: Message<S>> Envelope<S> for M {
    #[inline]
    fn deliver(self: Box<Self>, state: &mut S, handle: &Actor<S>) {
        (*self).handle(state, handle)
    }
}

pub(crate) type BoxedEnvelope<S> = Box<dyn Envelope<S>>;
