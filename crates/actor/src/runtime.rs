use std::sync::Weak;

use tokio::sync::mpsc;

use crate::Actor;
use crate::handle::Mailbox;
use crate::message::BoxedEnvelope;

pub(crate) async fn run_loop<S: Send + Sync + 'static>(
    mailbox: Weak<Mailbox<S>>,
    mut state: S,
    mut msg_rx: mpsc::UnboundedReceiver<BoxedEnvelope<S>>,
) {
    debug!("started");
    while let Some(envelope) = msg_rx.recv().await {
        trace!("received message: {envelope:?}");

        // Handles given to the handler must not keep the actor alive on
        // their own, so only upgrade for the duration of one message.
        let Some(mailbox) = mailbox.upgrade() else {
            warn!("all handles are gone, dropping message");
            break;
        };
        let handle = Actor::from_mailbox(mailbox);
        trace_span!("handle").in_scope(|| {
            envelope.deliver(&mut state, &handle);
        });
    }
    msg_rx.close();
    debug!("stopped");
}
