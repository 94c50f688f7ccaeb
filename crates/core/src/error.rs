//! Error kinds shared by every tool.
//!
//! Tool functions return these errors; the session layer turns them into
//! `"Error: <description>"` strings so they never reach a shell as failures.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Malformed Base64/URL data or bytes that are not valid UTF-8
    #[error("{0}")]
    Decode(String),

    /// Malformed JSON, JWT structure or numeric input
    #[error("{0}")]
    Format(String),

    /// Invalid regular expression syntax
    #[error("Invalid regex: {0}")]
    Pattern(String),
}

impl ToolError {
    /// User facing rendering used in output slots.
    pub fn to_slot(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<base64::DecodeError> for ToolError {
    fn from(err: base64::DecodeError) -> Self {
        ToolError::Decode(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for ToolError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ToolError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Format(err.to_string())
    }
}

impl From<regex::Error> for ToolError {
    fn from(err: regex::Error) -> Self {
        ToolError::Pattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slot_format_error() {
        let err = ToolError::Format("Invalid decimal number".to_string());
        assert_eq!(err.to_slot(), "Error: Invalid decimal number");
    }

    #[test]
    fn test_to_slot_pattern_error_keeps_engine_message() {
        let err = ToolError::Pattern("unclosed group".to_string());
        assert_eq!(err.to_slot(), "Error: Invalid regex: unclosed group");
    }
}
