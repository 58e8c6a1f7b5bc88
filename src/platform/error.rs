use thiserror::Error;

/// Errors from clipboard and browser access
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Clipboard could not be read
    #[error("{0}")]
    Clipboard(String),

    /// Default URL handler could not be launched
    #[error("Open url {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
