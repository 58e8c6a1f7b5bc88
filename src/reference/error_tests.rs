//! Unit tests for reference parse errors

#[cfg(test)]
mod tests {
    use crate::reference::error::ParseError;
    use std::error::Error;

    #[test]
    fn test_invalid_line_display() {
        let error = ParseError::invalid_line("main.rs:abc", "abc", "invalid digit found in string");
        assert_eq!(
            error.to_string(),
            "Cannot parse line number 'abc' in 'main.rs:abc': invalid digit found in string"
        );
    }

    #[test]
    fn test_ambiguous_separator_display() {
        let error = ParseError::AmbiguousSeparator {
            input: "a:1:2".to_string(),
            count: 2,
        };
        let display = error.to_string();
        assert!(display.contains("a:1:2"));
        assert!(display.contains("2 ':'"));
    }

    #[test]
    fn test_error_source() {
        let error = ParseError::invalid_line("x:y", "y", "bad");
        assert!(error.source().is_none());
    }
}
