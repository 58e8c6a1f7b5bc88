//! Desktop capabilities: reading the clipboard and opening URLs
//!
//! Both are traits so the orchestrator can be driven in tests without a
//! display server or a browser.

pub mod error;
pub mod mock;

pub use error::PlatformError;
pub use mock::{RecordingOpener, StaticClipboard};

/// Source of the text the user copied
pub trait ClipboardSource {
    /// Current clipboard text
    ///
    /// # Errors
    /// Returns `PlatformError::Clipboard` if the clipboard cannot be accessed.
    fn read_text(&self) -> Result<String, PlatformError>;
}

/// Opens a URL with the platform's default handler
pub trait UrlOpener {
    /// Open `url`
    ///
    /// # Errors
    /// Returns `PlatformError::Open` if the handler cannot be launched.
    fn open(&self, url: &str) -> Result<(), PlatformError>;
}

/// System clipboard via `arboard`
#[derive(Debug, Clone, Copy, Default)]
pub struct ArboardClipboard;

impl ClipboardSource for ArboardClipboard {
    fn read_text(&self) -> Result<String, PlatformError> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PlatformError::Clipboard(format!("Clipboard unavailable: {e}")))?;
        match clipboard.get_text() {
            Ok(text) => Ok(text),
            // Non-text content (an image, nothing at all) reads as empty
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(PlatformError::Clipboard(format!("Clipboard error: {e}"))),
        }
    }
}

/// Default browser via the `open` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), PlatformError> {
        open::that(url).map_err(|source| PlatformError::Open {
            url: url.to_string(),
            source,
        })
    }
}
