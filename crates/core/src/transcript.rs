//! The append-only, role-tagged history shown to the user.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Who a run of transcript text belongs to. Decides its styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Text the user submitted.
    User,
    /// Text produced by the model.
    Ai,
    /// A turn that failed.
    Error,
}

impl Role {
    /// The tag used for this role in logs and styling tables.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Ai => "ai",
            Role::Error => "error",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a role tag that does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRoleError(String);

impl Display for UnknownRoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transcript role: {:?}", self.0)
    }
}

impl Error for UnknownRoleError {}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "ai" => Ok(Role::Ai),
            "error" => Ok(Role::Error),
            _ => Err(UnknownRoleError(s.to_owned())),
        }
    }
}

/// A piece of text with a single role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    /// Who the text belongs to.
    pub role: Role,
    /// The text, including any line breaks.
    pub text: String,
}

/// An ordered sequence of runs that only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    runs: Vec<Run>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` at the end, tagged with `role`.
    #[inline]
    pub fn append<S: Into<String>>(&mut self, text: S, role: Role) {
        self.runs.push(Run {
            role,
            text: text.into(),
        });
    }

    /// Appends the line shown for a user submission: a `You: ` prefix,
    /// the text itself and a blank line, all tagged [`Role::User`].
    pub fn append_user_line(&mut self, text: &str) {
        self.append("You: ", Role::User);
        self.append(text, Role::User);
        self.append("\n\n", Role::User);
    }

    /// All runs, oldest first.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs.
    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Concatenates the text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Concatenates the text of the runs with the given role.
    pub fn text_of(&self, role: Role) -> String {
        self.runs
            .iter()
            .filter(|run| run.role == role)
            .map(|run| run.text.as_str())
            .collect()
    }
}
