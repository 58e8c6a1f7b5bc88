//! File references of the form `path[:line]`
//!
//! Editors, compilers and log lines print locations as `src/app.rs:42`. This
//! module splits such text into the path part and an optional line number.
//! A line of `0` means "no line".

pub mod error;

pub use error::ParseError;

use std::path::Path;

/// Separator between the path and the line number
const LINE_SEPARATOR: char = ':';

/// A path with an optional line number (`0` when absent)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub path: String,
    pub line: u32,
}

impl FileReference {
    /// Create a new reference
    #[must_use]
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Split `raw` into path and line.
    ///
    /// * no `:` - the whole input is the path, line `0`
    /// * one `:` - the suffix must be a base-10 integer
    /// * more than one `:` - rejected, the intent cannot be inferred
    ///
    /// # Errors
    /// * `ParseError::InvalidLineNumber` if the suffix after `:` is not a number.
    /// * `ParseError::AmbiguousSeparator` if `raw` contains more than one `:`.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let count = raw.matches(LINE_SEPARATOR).count();
        if count > 1 {
            return Err(ParseError::AmbiguousSeparator {
                input: raw.to_string(),
                count,
            });
        }

        let Some((path, line)) = raw.split_once(LINE_SEPARATOR) else {
            return Ok(Self::new(raw, 0));
        };

        let line = line
            .parse::<u32>()
            .map_err(|e| ParseError::invalid_line(raw, line, &e.to_string()))?;

        Ok(Self::new(path, line))
    }

    /// Whether the path part ends in a file extension (`.rs`, `.go`, ...)
    #[must_use]
    pub fn has_extension(&self) -> bool {
        Path::new(&self.path).extension().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_separator_keeps_path() {
        for raw in ["src/app.go", "app.go", "", "a/b/c/d.txt", "*.rs"] {
            let reference = FileReference::parse(raw).expect("plain path should parse");
            assert_eq!(reference.path, raw);
            assert_eq!(reference.line, 0);
        }
    }

    #[test]
    fn test_single_separator_with_digits() {
        let reference = FileReference::parse("src/app.go:42").unwrap();
        assert_eq!(reference, FileReference::new("src/app.go", 42));

        let reference = FileReference::parse("main.rs:0").unwrap();
        assert_eq!(reference.line, 0);
    }

    #[test]
    fn test_single_separator_with_non_digits() {
        for raw in ["app.go:abc", "app.go:", "app.go:12a", "app.go:-3", "app.go: 7"] {
            match FileReference::parse(raw) {
                Err(ParseError::InvalidLineNumber { input, .. }) => assert_eq!(input, raw),
                other => panic!("Expected InvalidLineNumber for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_multiple_separators_rejected() {
        for raw in ["a:1:2", "a::", "::", "src/app.go:10:5"] {
            match FileReference::parse(raw) {
                Err(ParseError::AmbiguousSeparator { count, .. }) => assert!(count >= 2),
                other => panic!("Expected AmbiguousSeparator for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_has_extension() {
        assert!(FileReference::new("src/app.go", 0).has_extension());
        assert!(FileReference::new(".config/x.toml", 0).has_extension());
        assert!(!FileReference::new("Makefile", 0).has_extension());
        assert!(!FileReference::new("some words here", 0).has_extension());
    }
}
