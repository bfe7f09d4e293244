//! State of the chat window and its input handling.
//!
//! Drawing lives in [`crate::ui`]; this module only decides what the
//! window shows.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use mentor_chat_core::renderer::RenderCommand;
use mentor_chat_core::transcript::Transcript;
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

use crate::session::Session;

const WHEEL_STEP: usize = 3;

/// The transcript and how far it is scrolled.
///
/// The offset is counted in wrapped lines from the bottom, so an offset
/// of zero follows new text as it arrives.
#[derive(Debug, Default)]
pub struct TranscriptPane {
    transcript: Transcript,
    offset_from_bottom: usize,
    viewport_height: usize,
}

impl TranscriptPane {
    /// The runs shown in the pane.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Wrapped lines between the last visible line and the end.
    #[inline]
    pub fn offset_from_bottom(&self) -> usize {
        self.offset_from_bottom
    }

    /// Returns `true` if the pane sticks to the newest text.
    #[inline]
    pub fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    /// Applies a command posted by a turn worker.
    pub fn apply(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Append(run) => self.transcript.append(run.text, run.role),
            RenderCommand::ScrollToEnd => self.scroll_to_end(),
        }
    }

    /// Jumps to the newest text and follows it again.
    #[inline]
    pub fn scroll_to_end(&mut self) {
        self.offset_from_bottom = 0;
    }

    /// Scrolls towards older text.
    #[inline]
    pub fn scroll_up(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(lines);
    }

    /// Scrolls towards newer text.
    #[inline]
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    /// Clamps the offset to what can actually be scrolled and returns the
    /// index of the first visible line.
    ///
    /// Called while drawing, once the wrapped height is known.
    pub fn layout(&mut self, total_lines: usize, viewport_height: usize) -> usize {
        self.viewport_height = viewport_height;
        let max_offset = total_lines.saturating_sub(viewport_height);
        self.offset_from_bottom = self.offset_from_bottom.min(max_offset);
        max_offset - self.offset_from_bottom
    }

    fn page(&self) -> usize {
        self.viewport_height.saturating_sub(1).max(1)
    }
}

/// A single-line text field with a cursor.
#[derive(Debug, Default)]
pub struct InputField {
    text: String,
    // Byte index into `text`, always on a char boundary.
    cursor: usize,
}

impl InputField {
    /// The current contents.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Display columns between the start of the field and the cursor.
    #[inline]
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    /// Inserts a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    /// Moves the cursor one character to the left.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    /// Moves the cursor one character to the right.
    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    /// Moves the cursor to the start.
    #[inline]
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor past the last character.
    #[inline]
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Empties the field and returns what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }
}

/// The chat window.
pub struct App {
    session: Session,
    pub(crate) transcript: TranscriptPane,
    pub(crate) input: InputField,
    pub(crate) send_button: Rect,
    should_exit: bool,
}

impl App {
    /// Creates a window that sends its messages to `session`.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            transcript: TranscriptPane::default(),
            input: InputField::default(),
            send_button: Rect::default(),
            should_exit: false,
        }
    }

    /// The transcript pane.
    #[inline]
    pub fn transcript(&self) -> &TranscriptPane {
        &self.transcript
    }

    /// The input field.
    #[inline]
    pub fn input(&self) -> &InputField {
        &self.input
    }

    /// Returns `true` once the user asked to close the window.
    #[inline]
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Applies a command posted by a turn worker.
    #[inline]
    pub fn apply_render_command(&mut self, command: RenderCommand) {
        self.transcript.apply(command);
    }

    /// Handles a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                self.handle_key(key)
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Paste(text) => self.paste(&text),
            _ => {}
        }
    }

    /// Submits what is in the input field.
    ///
    /// The field is cleared in any case. Blank text appends nothing.
    pub fn submit(&mut self) {
        let text = self.input.take();
        if text.trim().is_empty() {
            return;
        }

        self.transcript.transcript.append_user_line(&text);
        self.transcript.scroll_to_end();
        if let Err(err) = self.session.send_message(&text) {
            error!("failed to submit message: {err}");
        }
    }

    /// Inserts pasted text at the cursor. The field holds one line, so
    /// line breaks become spaces and other control characters are dropped.
    pub fn paste(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' => self.input.insert(' '),
                ch if ch.is_control() => {}
                ch => self.input.insert(ch),
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_exit = true,
            KeyCode::Char('c' | 'd') if ctrl => self.should_exit = true,
            KeyCode::Char('a') if ctrl => self.input.move_home(),
            KeyCode::Char('e') if ctrl => self.input.move_end(),
            KeyCode::Char(ch) if !ctrl => self.input.insert(ch),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::PageUp => {
                let page = self.transcript.page();
                self.transcript.scroll_up(page);
            }
            KeyCode::PageDown => {
                let page = self.transcript.page();
                self.transcript.scroll_down(page);
            }
            KeyCode::Up => self.transcript.scroll_up(1),
            KeyCode::Down => self.transcript.scroll_down(1),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.transcript.scroll_up(WHEEL_STEP),
            MouseEventKind::ScrollDown => self.transcript.scroll_down(WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                let at = Position::new(mouse.column, mouse.row);
                if self.send_button.contains(at) {
                    self.submit();
                }
            }
            _ => {}
        }
    }
}
