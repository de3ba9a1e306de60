//! Error type with source location tracking.
//!
//! All recoverable problems in burnish carry the input line and column where
//! they were detected, enabling precise diagnostics without threading the
//! input text around.
//!
//! # Example
//!
//! ```
//! use burnish_base::SpannedError;
//!
//! let err = SpannedError::new("unterminated string", 12, 30);
//! assert!(err.to_string().contains("line 12"));
//! ```

use thiserror::Error;

/// An error annotated with its input position.
#[derive(Debug, Clone, Error)]
#[error("{message} at line {line}, column {col}")]
pub struct SpannedError {
    /// Human-readable description.
    pub message: String,
    /// 1-based input line.
    pub line: usize,
    /// 1-based input column.
    pub col: usize,
}

impl SpannedError {
    /// Creates an error with the given message and input position.
    pub fn new(message: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }
}

/// Alias for `std::result::Result<T, SpannedError>`.
pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = SpannedError::new("bad token", 7, 3);
        let text = err.to_string();
        assert!(text.contains("bad token"));
        assert!(text.contains("line 7"));
        assert!(text.contains("column 3"));
    }
}
