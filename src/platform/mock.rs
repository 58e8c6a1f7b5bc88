//! Test doubles for the platform capabilities

use std::cell::RefCell;

use super::error::PlatformError;
use super::{ClipboardSource, UrlOpener};

/// Clipboard returning fixed text, or failing
#[derive(Debug, Clone, Default)]
pub struct StaticClipboard {
    text: Option<String>,
}

impl StaticClipboard {
    /// Clipboard containing `text`
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Clipboard that cannot be accessed
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { text: None }
    }
}

impl ClipboardSource for StaticClipboard {
    fn read_text(&self) -> Result<String, PlatformError> {
        self.text
            .clone()
            .ok_or_else(|| PlatformError::Clipboard("Clipboard unavailable: no display".to_string()))
    }
}

/// Opener that records URLs instead of launching anything
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: RefCell<Vec<String>>,
    should_fail: bool,
}

impl RecordingOpener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opener whose every call fails
    #[must_use]
    pub fn failing() -> Self {
        Self {
            opened: RefCell::new(Vec::new()),
            should_fail: true,
        }
    }

    /// URLs opened so far
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), PlatformError> {
        if self.should_fail {
            return Err(PlatformError::Open {
                url: url.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no browser"),
            });
        }
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_clipboard() {
        assert_eq!(StaticClipboard::new("a.rs:3").read_text().unwrap(), "a.rs:3");
        assert!(StaticClipboard::unavailable().read_text().is_err());
    }

    #[test]
    fn test_recording_opener() {
        let opener = RecordingOpener::new();
        opener.open("https://example.com").unwrap();
        assert_eq!(opener.opened(), vec!["https://example.com".to_string()]);

        let failing = RecordingOpener::failing();
        let err = failing.open("https://example.com").unwrap_err();
        assert!(err.to_string().starts_with("Open url https://example.com"));
        assert!(failing.opened().is_empty());
    }
}
