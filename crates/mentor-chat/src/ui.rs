//! Drawing of the chat window.

use mentor_chat_core::transcript::Transcript;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    Wrap,
};

use crate::app::App;
use crate::theme::{
    BUTTON_BG, BUTTON_FG, FRAME_BG, TRANSCRIPT_BG, USER_FG, role_style,
};

const TITLE: &str = " Chat App ";
const ENTRY_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 10;

/// Draws the whole window and records where the Send button ended up.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(FRAME_BG)), area);

    let [transcript_area, entry_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(ENTRY_HEIGHT)])
            .margin(1)
            .areas(area);
    draw_transcript(frame, app, transcript_area);

    let [input_area, button_area] = Layout::horizontal([
        Constraint::Min(4),
        Constraint::Length(BUTTON_WIDTH),
    ])
    .spacing(1)
    .areas(entry_area);
    draw_input(frame, app, input_area);
    draw_send_button(frame, button_area);
    app.send_button = button_area;
}

fn draw_transcript(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::bordered()
        .title(TITLE)
        .padding(Padding::horizontal(1))
        .style(Style::new().fg(USER_FG).bg(TRANSCRIPT_BG));
    let inner = block.inner(area);

    let paragraph = Paragraph::new(transcript_lines(app.transcript.transcript()))
        .wrap(Wrap { trim: false });
    let total_lines = paragraph.line_count(inner.width);
    let viewport = usize::from(inner.height);
    let top = app.transcript.layout(total_lines, viewport);

    let scroll_y = u16::try_from(top).unwrap_or(u16::MAX);
    frame.render_widget(paragraph.block(block).scroll((scroll_y, 0)), area);

    if total_lines > viewport {
        let mut state =
            ScrollbarState::new(total_lines - viewport).position(top);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .thumb_style(Style::new().fg(BUTTON_FG).bg(BUTTON_BG));
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin::new(0, 1)),
            &mut state,
        );
    }
}

fn draw_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::bordered()
        .style(Style::new().fg(USER_FG).bg(TRANSCRIPT_BG));
    let inner = block.inner(area);

    // Keep the cursor in view when the text is wider than the field.
    let cursor = app.input.cursor_column();
    let width = usize::from(inner.width.max(1));
    let scroll_x = cursor.saturating_sub(width - 1);

    let paragraph = Paragraph::new(app.input.text())
        .block(block)
        .scroll((0, u16::try_from(scroll_x).unwrap_or(u16::MAX)));
    frame.render_widget(paragraph, area);

    let column = u16::try_from(cursor - scroll_x).unwrap_or(0);
    frame.set_cursor_position(Position::new(inner.x + column, inner.y));
}

fn draw_send_button(frame: &mut Frame<'_>, area: Rect) {
    let button = Paragraph::new("Send")
        .centered()
        .block(Block::bordered())
        .style(Style::new().fg(BUTTON_FG).bg(BUTTON_BG));
    frame.render_widget(button, area);
}

/// Turns the runs of a transcript into styled lines, breaking at every
/// `'\n'` inside a run.
pub fn transcript_lines(transcript: &Transcript) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for run in transcript.runs() {
        let style = role_style(run.role);
        for (i, segment) in run.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !segment.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.push_span(Span::styled(segment.to_owned(), style));
                }
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mentor_chat_core::renderer::RenderCommand;
    use mentor_chat_core::transcript::{Role, Run};
    use mentor_chat_test_model::TestModelProvider;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;
    use crate::session::SessionBuilder;
    use crate::theme::AI_FG;

    fn buffer_rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    fn append(app: &mut App, text: &str, role: Role) {
        app.apply_render_command(RenderCommand::Append(Run {
            role,
            text: text.to_owned(),
        }));
    }

    fn new_app() -> App {
        let (session, _queue) =
            SessionBuilder::with_model_provider(TestModelProvider::default())
                .with_token_delay(Duration::ZERO)
                .build();
        App::new(session)
    }

    #[test]
    fn test_transcript_lines() {
        let mut transcript = Transcript::new();
        transcript.append_user_line("Hi");
        transcript.append("Hello", Role::Ai);
        transcript.append(" world", Role::Ai);
        transcript.append("\n\n", Role::Ai);

        let lines = transcript_lines(&transcript);
        let text: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        assert_eq!(text, ["You: Hi", "", "Hello world", "", ""]);
        assert_eq!(lines[2].spans.len(), 2);
        assert_eq!(lines[2].spans[0].style.fg, Some(AI_FG));
    }

    #[tokio::test]
    async fn test_draw_window() {
        let mut app = new_app();
        append(&mut app, "You: Hello\n\n", Role::User);
        append(&mut app, "Hi there!\n\n", Role::Ai);

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let rows = buffer_rows(terminal.backend().buffer());
        assert!(rows[1].contains("Chat App"), "{rows:#?}");
        assert!(rows[2].contains("You: Hello"), "{rows:#?}");
        assert!(rows[4].contains("Hi there!"), "{rows:#?}");
        assert!(rows[9].contains("Send"), "{rows:#?}");
        assert_eq!(app.send_button, Rect::new(29, 8, BUTTON_WIDTH, 3));
    }

    #[tokio::test]
    async fn test_follows_newest_text() {
        let mut app = new_app();
        for i in 0..30 {
            append(&mut app, &format!("line {i}\n"), Role::Ai);
        }

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let rows = buffer_rows(terminal.backend().buffer());
        // The last visible line is the empty one after the final break.
        assert!(rows[5].contains("line 29"), "{rows:#?}");
        assert!(!rows.iter().any(|row| row.contains("line 25")));

        app.transcript.scroll_up(10);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let rows = buffer_rows(terminal.backend().buffer());
        assert!(rows[5].contains("line 19"), "{rows:#?}");

        // New text does not yank the view back down.
        append(&mut app, "line 30\n", Role::Ai);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let rows = buffer_rows(terminal.backend().buffer());
        assert!(!rows.iter().any(|row| row.contains("line 30")));

        app.apply_render_command(RenderCommand::ScrollToEnd);
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let rows = buffer_rows(terminal.backend().buffer());
        assert!(rows[5].contains("line 30"), "{rows:#?}");
    }
}
