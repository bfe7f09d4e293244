use std::time::Duration;

use mentor_chat_model::ModelProviderError;
use tokio::time::sleep;

use super::TurnSettings;
use crate::model_client::ModelClient;
use crate::prompt::Prompt;
use crate::renderer::{Renderer, RendererClosedError};
use crate::tokenize::tokenize;
use crate::transcript::Role;

/// Appended after every reply, and after every error run.
const TURN_SEPARATOR: &str = "\n\n";

/// The body of one worker: ask the model, then render the outcome.
pub(super) async fn run_turn(
    model_client: ModelClient,
    renderer: Renderer,
    settings: TurnSettings,
    user_text: String,
) {
    let request = Prompt::new(&*settings.system_prompt, user_text)
        .into_request(settings.temperature);
    let rendered = match model_client.send_request(request).await {
        Ok(resp) => {
            stream_reply(&renderer, resp.content.trim(), settings.token_delay)
                .await
        }
        Err(err) => render_failure(&renderer, &*err),
    };
    if let Err(err) = rendered {
        warn!("turn was not fully rendered: {err}");
    }
}

/// Feeds `reply` to the renderer one token at a time, pausing for
/// `token_delay` after every token that is not pure whitespace, and
/// finishes with a blank line.
pub async fn stream_reply(
    renderer: &Renderer,
    reply: &str,
    token_delay: Duration,
) -> Result<(), RendererClosedError> {
    for token in tokenize(reply) {
        renderer.append(token.text(), Role::Ai)?;
        renderer.scroll_to_end()?;
        if !token.is_whitespace() {
            sleep(token_delay).await;
        }
    }
    renderer.append(TURN_SEPARATOR, Role::Ai)?;
    renderer.scroll_to_end()
}

fn render_failure(
    renderer: &Renderer,
    err: &dyn ModelProviderError,
) -> Result<(), RendererClosedError> {
    renderer.append(format!("[error] {err}{TURN_SEPARATOR}"), Role::Error)?;
    renderer.scroll_to_end()
}

/// Closes a turn whose worker died before it could render anything
/// meaningful.
pub(super) fn render_crash(renderer: &Renderer) -> Result<(), RendererClosedError> {
    renderer.append(
        format!("[error] the reply could not be produced{TURN_SEPARATOR}"),
        Role::Error,
    )?;
    renderer.scroll_to_end()
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::renderer::{self, RenderCommand};

    #[tokio::test(start_paused = true)]
    async fn test_delay_per_word() {
        let (renderer, mut queue) = renderer::channel();
        let start = Instant::now();
        stream_reply(&renderer, "one two  three\nfour", Duration::from_millis(3))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(12));

        let appended: Vec<_> = queue
            .drain()
            .into_iter()
            .filter_map(|command| match command {
                RenderCommand::Append(run) => Some(run.text),
                RenderCommand::ScrollToEnd => None,
            })
            .collect();
        assert_eq!(
            appended,
            ["one", " ", "two", "  ", "three", "\n", "four", "\n\n"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_is_not_delayed() {
        let (renderer, mut queue) = renderer::channel();
        let start = Instant::now();
        stream_reply(&renderer, " \n\t ", Duration::from_millis(3))
            .await
            .unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        // One whitespace token and the separator, each followed by a scroll.
        assert_eq!(queue.drain().len(), 4);
    }

    #[tokio::test]
    async fn test_every_append_scrolls() {
        let (renderer, mut queue) = renderer::channel();
        stream_reply(&renderer, "a b", Duration::ZERO).await.unwrap();
        let commands = queue.drain();
        for pair in commands.chunks(2) {
            assert!(matches!(pair[0], RenderCommand::Append(_)));
            assert_eq!(pair[1], RenderCommand::ScrollToEnd);
        }
    }

    #[tokio::test]
    async fn test_closed_renderer_stops_streaming() {
        let (renderer, queue) = renderer::channel();
        drop(queue);
        let result = stream_reply(&renderer, "never shown", Duration::ZERO).await;
        assert_eq!(result, Err(RendererClosedError));
    }
}
