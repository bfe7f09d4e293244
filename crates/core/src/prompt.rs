//! The two-message prompt sent for every turn.

use mentor_chat_model::{ModelMessage, ModelRequest};

/// The system persona that steers the assistant toward helping with
/// Python code.
pub const MENTOR_PERSONA: &str = include_str!("./persona.md");

/// Sampling temperature used for every turn.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// A prompt for a single turn.
///
/// Prompts never carry earlier turns: each one holds exactly the system
/// persona and the text the user just submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    system_text: String,
    user_text: String,
}

impl Prompt {
    /// Creates a prompt from a system text and the verbatim user text.
    #[inline]
    pub fn new<S: Into<String>, U: Into<String>>(system_text: S, user_text: U) -> Self {
        Self {
            system_text: system_text.into(),
            user_text: user_text.into(),
        }
    }

    /// Converts the prompt into a model request.
    pub fn into_request(self, temperature: f32) -> ModelRequest {
        ModelRequest {
            messages: vec![
                ModelMessage::System(self.system_text),
                ModelMessage::User(self.user_text),
            ],
            temperature,
        }
    }
}
