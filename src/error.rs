//! Error types for string-configured values

use thiserror::Error;

/// Failure to parse a configuration value from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown sheet size `{0}` (expected sm, md, lg, small, medium or large)")]
    UnknownSize(String),

    #[error("unknown mouse cursor `{0}`")]
    UnknownCursor(String),

    #[error("unknown escape repeat policy `{0}` (expected ignore or refire)")]
    UnknownEscapePolicy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_input() {
        let err = ParseError::UnknownSize("huge".into());
        assert!(err.to_string().contains("`huge`"));

        let err = ParseError::UnknownEscapePolicy("sometimes".into());
        assert!(err.to_string().contains("ignore or refire"));
    }
}
