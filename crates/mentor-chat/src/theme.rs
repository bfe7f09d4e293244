//! Static colors of the chat window.

use mentor_chat_core::transcript::Role;
use ratatui::style::{Color, Style};

/// Background around the panes.
pub const FRAME_BG: Color = Color::Rgb(0x35, 0x37, 0x4b);
/// Background of the transcript pane.
pub const TRANSCRIPT_BG: Color = Color::Black;
/// Foreground of user lines.
pub const USER_FG: Color = Color::Rgb(0xcc, 0xc8, 0xaa);
/// Foreground of model replies.
pub const AI_FG: Color = Color::Rgb(0x78, 0xa0, 0x83);
/// Foreground of failed turns.
pub const ERROR_FG: Color = Color::Rgb(0xe0, 0x6c, 0x75);
/// Background of the Send button and the scrollbar thumb.
pub const BUTTON_BG: Color = Color::Rgb(0x44, 0x44, 0x43);
/// Foreground of the Send button ("light grey").
pub const BUTTON_FG: Color = Color::Rgb(0xd3, 0xd3, 0xd3);

/// Style of transcript text with the given role.
#[inline]
pub fn role_style(role: Role) -> Style {
    let fg = match role {
        Role::User => USER_FG,
        Role::Ai => AI_FG,
        Role::Error => ERROR_FG,
    };
    Style::new().fg(fg).bg(TRANSCRIPT_BG)
}
