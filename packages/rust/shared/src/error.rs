//! Error types for llmstxt.
//!
//! Library crates use [`LlmsTxtError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all llmstxt operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmsTxtError {
    /// Configuration loading, parsing, or serialization error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest or header validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LlmsTxtError>;

impl LlmsTxtError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = LlmsTxtError::config("unknown field `tocc`");
        assert_eq!(err.to_string(), "config error: unknown field `tocc`");

        let err = LlmsTxtError::validation("duplicate manifest entry 'a.md'");
        assert!(err.to_string().contains("duplicate manifest entry"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LlmsTxtError::io("public/llms.txt", source);
        let msg = err.to_string();
        assert!(msg.contains("public/llms.txt"));
        assert!(msg.contains("gone"));
    }
}
