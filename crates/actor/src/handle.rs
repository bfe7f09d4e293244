use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::message::BoxedEnvelope;
use crate::runtime::run_loop;
use crate::{ActorDeadError, Message};

pub(crate) struct Mailbox<S> {
    msg_tx: mpsc::UnboundedSender<BoxedEnvelope<S>>,
}

/// Handle to a running actor.
///
/// Handles are cheap to clone. The actor keeps running until the last
/// handle outside of its own task has been dropped.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + Sync + 'static> Actor<S> {
    /// Spawns the actor task on the current tokio runtime.
    ///
    /// Usually this is called through the `spawn` method generated by
    /// [`crate::define_actor`].
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let mailbox = Arc::new(Mailbox { msg_tx });
        tokio::spawn(
            run_loop(Arc::downgrade(&mailbox), state, msg_rx)
                .instrument(debug_span!("actor", label = label)),
        );
        Self { mailbox }
    }

    /// Posts a message to the actor's mailbox.
    #[inline]
    pub fn send<M: Message<S>>(&self, msg: M) -> Result<(), ActorDeadError> {
        self.mailbox
            .msg_tx
            .send(Box::new(msg))
            .map_err(|_| ActorDeadError)
    }
}

impl<S> Actor<S> {
    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
