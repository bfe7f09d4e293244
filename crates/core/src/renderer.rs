//! Message passing between turn workers and the UI that owns the
//! transcript.
//!
//! Workers never touch the transcript directly. They hold a [`Renderer`]
//! and post [`RenderCommand`]s; the UI loop drains its [`RenderQueue`]
//! and applies the commands in order.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tokio::sync::mpsc;

use crate::transcript::{Role, Run};

/// A mutation of the transcript surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderCommand {
    /// Append a run at the end of the transcript.
    Append(Run),
    /// Make the most recent run visible.
    ScrollToEnd,
}

/// Returned when the receiving side of the render queue is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RendererClosedError;

impl Display for RendererClosedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        "the transcript renderer has been closed".fmt(f)
    }
}

impl Error for RendererClosedError {}

/// Creates a connected renderer handle and queue.
pub fn channel() -> (Renderer, RenderQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Renderer { tx }, RenderQueue { rx })
}

/// Sending half, cloned into every worker.
#[derive(Clone, Debug)]
pub struct Renderer {
    tx: mpsc::UnboundedSender<RenderCommand>,
}

impl Renderer {
    /// Requests `text` to be appended with the given role.
    #[inline]
    pub fn append<S: Into<String>>(
        &self,
        text: S,
        role: Role,
    ) -> Result<(), RendererClosedError> {
        self.send(RenderCommand::Append(Run {
            role,
            text: text.into(),
        }))
    }

    /// Requests the transcript to scroll to its last run.
    #[inline]
    pub fn scroll_to_end(&self) -> Result<(), RendererClosedError> {
        self.send(RenderCommand::ScrollToEnd)
    }

    #[inline]
    fn send(&self, command: RenderCommand) -> Result<(), RendererClosedError> {
        self.tx.send(command).map_err(|_| RendererClosedError)
    }
}

/// Receiving half, owned by the UI loop.
#[derive(Debug)]
pub struct RenderQueue {
    rx: mpsc::UnboundedReceiver<RenderCommand>,
}

impl RenderQueue {
    /// Waits for the next command. Returns `None` once every
    /// [`Renderer`] has been dropped and the queue is empty.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe, so it can be used in `select!`.
    #[inline]
    pub async fn recv(&mut self) -> Option<RenderCommand> {
        self.rx.recv().await
    }

    /// Takes every command that is already queued without waiting.
    pub fn drain(&mut self) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            commands.push(command);
        }
        commands
    }
}
