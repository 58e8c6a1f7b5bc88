//! Output abstraction layer
//!
//! Progress lines and the final URL go through [`OutputWriter`] so the
//! orchestrator can print to the terminal in the binary and be inspected in
//! tests.

use colored::Colorize;
use std::sync::Mutex;

/// Trait for output operations
///
/// # Examples
///
/// ```
/// use opengithub::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new(false);
/// output.info("Using clipboard text: src/app.go:42");
/// output.success("https://github.com/acme/widgets/blob/main/src/app.go#L42");
/// ```
pub trait OutputWriter {
    /// Progress message, suppressed in quiet mode
    fn info(&self, message: &str);

    /// Error message
    fn error(&self, message: &str);

    /// Final result, always shown
    fn success(&self, message: &str);
}

/// CLI implementation - writes to stdout/stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl OutputWriter for StdoutWriter {
    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        if self.quiet {
            println!("{message}");
        } else {
            println!("🎉 {}", message.green());
        }
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
    Success,
}

/// Writer that keeps every message in memory
#[derive(Debug, Default)]
pub struct BufferedWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferedWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages written so far, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Messages of one level
    #[must_use]
    pub fn messages_at(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: MessageLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl OutputWriter for BufferedWriter {
    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageLevel::Success, message);
    }
}
