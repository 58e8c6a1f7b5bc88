use thiserror::Error;

/// Errors produced while splitting a `path[:line]` reference
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The text after the `:` is not a base-10 line number
    #[error("Cannot parse line number '{value}' in '{input}': {reason}")]
    InvalidLineNumber {
        input: String,
        value: String,
        reason: String,
    },
    /// More than one `:` so the line part cannot be inferred
    #[error("Cannot parse file line, '{input}' contains {count} ':' separators")]
    AmbiguousSeparator { input: String, count: usize },
}

impl ParseError {
    #[must_use]
    pub fn invalid_line(input: &str, value: &str, reason: &str) -> Self {
        Self::InvalidLineNumber {
            input: input.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
