use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use mentor_chat::core::ConcurrencyPolicy;
use mentor_chat::core::renderer::RenderQueue;
use mentor_chat::core::transcript::Role;
use mentor_chat::{App, SessionBuilder};
use mentor_chat_model::ErrorKind;
use mentor_chat_test_model::{PresetResponse, TestModelProvider};
use tokio::sync::mpsc;
use tokio::time::timeout;

struct Window {
    app: App,
    render_queue: RenderQueue,
    idle_rx: mpsc::UnboundedReceiver<()>,
}

impl Window {
    fn open(builder: SessionBuilder) -> Self {
        let (idle_tx, idle_rx) = mpsc::unbounded_channel();
        let (session, render_queue) = builder
            .on_idle(move || {
                idle_tx.send(()).ok();
            })
            .build();
        Self {
            app: App::new(session),
            render_queue,
            idle_rx,
        }
    }

    fn type_and_submit(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(KeyCode::Char(ch));
        }
        self.key(KeyCode::Enter);
    }

    fn key(&mut self, code: KeyCode) {
        self.app
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    async fn wait_idle(&mut self) {
        timeout(Duration::from_secs(5), self.idle_rx.recv())
            .await
            .expect("no reply in time")
            .unwrap();
        self.pump();
    }

    /// Applies whatever the workers have posted so far.
    fn pump(&mut self) {
        for command in self.render_queue.drain() {
            self.app.apply_render_command(command);
        }
    }

    fn text(&self) -> String {
        self.app.transcript().transcript().text()
    }
}

#[tokio::test]
async fn test_hello() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_reply("Hi there!");
    let mut window =
        Window::open(SessionBuilder::with_model_provider(model_provider));

    window.type_and_submit("Hello");
    window.wait_idle().await;

    assert_eq!(window.text(), "You: Hello\n\nHi there!\n\n");
    assert!(window.app.transcript().is_following());
}

#[tokio::test]
async fn test_empty_submission() {
    let model_provider = TestModelProvider::default();
    let mut window =
        Window::open(SessionBuilder::with_model_provider(model_provider.clone()));

    window.key(KeyCode::Enter);
    window.type_and_submit("  \t ");
    assert_eq!(window.text(), "");
    assert_eq!(window.app.input().text(), "");
    assert!(model_provider.requests().is_empty());
}

#[tokio::test]
async fn test_transport_failure_keeps_window_usable() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_failure(ErrorKind::Transport);
    model_provider.add_reply("Back online.");
    let mut window =
        Window::open(SessionBuilder::with_model_provider(model_provider));

    window.type_and_submit("Hello");
    window.wait_idle().await;
    let transcript = window.app.transcript().transcript();
    assert_eq!(transcript.text_of(Role::User), "You: Hello\n\n");
    assert!(transcript.text_of(Role::Ai).is_empty());
    assert!(transcript.text_of(Role::Error).starts_with("[error] transport error"));

    window.type_and_submit("Still there?");
    window.wait_idle().await;
    let text = window.text();
    assert!(text.starts_with("You: Hello\n\n[error]"), "{text}");
    assert!(text.ends_with("You: Still there?\n\nBack online.\n\n"), "{text}");
}

#[tokio::test(start_paused = true)]
async fn test_rapid_submissions_get_both_replies() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_response(
        PresetResponse::with_reply("Use pathlib.").delayed(Duration::from_millis(50)),
    );
    model_provider.add_reply("Use enumerate.");
    let mut window = Window::open(
        SessionBuilder::with_model_provider(model_provider.clone())
            .with_concurrency_policy(ConcurrencyPolicy::Unbounded),
    );

    window.type_and_submit("How do I join paths?");
    window.type_and_submit("How do I count in a loop?");
    // Both user lines show up before any reply.
    assert_eq!(
        window.text(),
        "You: How do I join paths?\n\nYou: How do I count in a loop?\n\n"
    );

    window.wait_idle().await;
    let ai_text = window.app.transcript().transcript().text_of(Role::Ai);
    assert!(ai_text.contains("Use pathlib."), "{ai_text}");
    assert!(ai_text.contains("Use enumerate."), "{ai_text}");
    assert_eq!(model_provider.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_user_line_shows_while_reply_is_rendering() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_reply("Hi there!");
    model_provider.add_reply("ok");
    let mut window =
        Window::open(SessionBuilder::with_model_provider(model_provider));

    window.type_and_submit("one");
    // Stop right after the first word has been rendered.
    tokio::time::sleep(Duration::from_millis(1)).await;
    window.pump();
    assert_eq!(window.text(), "You: one\n\nHi");

    // The next user line goes in at once; its reply waits for the first.
    window.type_and_submit("two");
    window.wait_idle().await;
    assert_eq!(
        window.text(),
        "You: one\n\nHiYou: two\n\n there!\n\nok\n\n"
    );
}
