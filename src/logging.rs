//! Diagnostic logging to stderr
//!
//! Progress for the user goes through [`crate::output`]. This is the
//! developer-facing trace of the path search and git queries, off unless
//! `-v` or `RUST_LOG` asks for it.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
#[must_use]
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,opengithub=debug",
        _ => "warn,opengithub=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose` when set.
///
/// Calling this twice keeps the first subscriber.
pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(0), "warn");
        assert!(default_filter(1).contains("opengithub=debug"));
        assert!(default_filter(2).contains("opengithub=trace"));
        assert_eq!(default_filter(7), default_filter(2));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(0);
        init_logging(2);
    }
}
