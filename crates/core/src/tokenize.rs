//! Splits a reply into words and the whitespace between them.

use std::iter::FusedIterator;
use std::sync::LazyLock;

use regex::{Matches, Regex};

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+|\s+").expect("token pattern is valid"));

/// A run of non-whitespace or a run of whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    text: &'a str,
}

impl<'a> Token<'a> {
    /// The slice of the input this token covers.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Returns `true` if the token consists only of whitespace.
    #[inline]
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Lazy iterator returned by [`tokenize`].
#[derive(Debug)]
pub struct Tokens<'a> {
    matches: Matches<'static, 'a>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next().map(|m| Token { text: m.as_str() })
    }
}

impl FusedIterator for Tokens<'_> {}

/// Splits `text` into alternating runs of non-whitespace and whitespace.
///
/// Every byte of the input belongs to exactly one token, so joining the
/// tokens gives back the input unchanged.
#[inline]
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        matches: TOKEN_PATTERN.find_iter(text),
    }
}
