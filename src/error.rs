//! Structured error types for the Vitae typesetter.
//!
//! Layout never fails. Errors come from reading configuration or resume
//! JSON, from PDF serialization, and from writing the result to disk.

use thiserror::Error;

/// Result alias used by the fallible public API.
pub type Result<T> = std::result::Result<T, VitaeError>;

/// The unified error type returned by all fallible Vitae functions.
#[derive(Debug, Error)]
pub enum VitaeError {
    /// JSON input (config or structured resume) failed to parse.
    #[error("Failed to parse input: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// The layout configuration parsed but describes an unusable page.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// PDF generation failed.
    #[error("Render error: {0}")]
    Render(String),
    /// Reading input or writing the PDF failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for VitaeError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input, is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        VitaeError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_carries_hint() {
        let err: VitaeError = serde_json::from_str::<serde_json::Value>("{ \"a\": 1, }")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse input"));
        assert!(msg.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn eof_error_hint() {
        let err: VitaeError = serde_json::from_str::<serde_json::Value>("{ \"a\": ")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn source_is_exposed() {
        use std::error::Error as _;
        let err: VitaeError = serde_json::from_str::<serde_json::Value>("[")
            .unwrap_err()
            .into();
        assert!(err.source().is_some());
    }
}
