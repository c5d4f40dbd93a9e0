//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret for `Debug` output.
///
/// Keys and secrets handed out by publit.io are short, so only strings of at
/// least 16 characters keep their first two characters visible. Everything
/// else is masked completely. The original length is never revealed.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.char_indices().nth(2) {
            _ if self.0.is_empty() => f.write_str("EMPTY"),
            Some((idx, _)) if self.0.chars().count() >= 16 => {
                write!(f, "{}****", &self.0[..idx])
            }
            _ => f.write_str("****"),
        }
    }
}
