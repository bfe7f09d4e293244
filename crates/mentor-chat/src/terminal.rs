//! The terminal event loop.

use std::io::{self, Stdout};
use std::panic;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
    EnableMouseCapture, EventStream,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use futures_util::StreamExt;
use mentor_chat_core::renderer::RenderQueue;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::select;

use crate::app::App;
use crate::ui;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Runs the window until the user closes it.
///
/// Terminal events and transcript updates are handled on the calling
/// task, which is the only place the transcript is ever touched. The
/// terminal is restored on return and on panic.
pub async fn run(app: &mut App, mut render_queue: RenderQueue) -> io::Result<()> {
    let mut terminal = setup()?;
    install_panic_hook();

    let result = event_loop(&mut terminal, app, &mut render_queue).await;
    let restored = restore(&mut terminal);
    result.and(restored)
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    render_queue: &mut RenderQueue,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut queue_open = true;
    terminal.draw(|frame| ui::draw(frame, app))?;

    while !app.should_exit() {
        select! {
            event = events.next() => match event {
                Some(Ok(event)) => app.handle_event(event),
                Some(Err(err)) => return Err(err),
                None => break,
            },
            command = render_queue.recv(), if queue_open => match command {
                Some(command) => {
                    app.apply_render_command(command);
                    // Coalesce whatever else is already queued into one
                    // redraw.
                    for command in render_queue.drain() {
                        app.apply_render_command(command);
                    }
                }
                None => {
                    warn!("render queue closed");
                    queue_open = false;
                }
            },
        }
        terminal.draw(|frame| ui::draw(frame, app))?;
    }
    Ok(())
}

fn setup() -> io::Result<Tui> {
    enable_raw_mode()?;
    execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));
}
