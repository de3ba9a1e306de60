//! Fatal error kinds.
//!
//! Lexing and retagging problems are recoverable: they are logged, counted
//! on the context, and the pipeline keeps the stream well-formed. Only
//! configuration contradictions and capacity overruns abort a run, and they
//! do so before or during formatting, never after output has begun.

use thiserror::Error;

/// A fatal condition that aborts formatting.
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// An `nl_*` option demands more blank lines than `nl_max` allows.
    #[error("option {option} = {value} exceeds nl_max = {nl_max}")]
    OptionOverflow {
        option: &'static str,
        value: usize,
        nl_max: usize,
    },

    /// A fixed-capacity alignment structure overflowed.
    #[error("{what} capacity {limit} exceeded at line {line}, column {col}; please report this input")]
    StackCapacity {
        what: &'static str,
        limit: usize,
        line: usize,
        col: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_limit() {
        let err = FormatError::StackCapacity {
            what: "init-brace scratch table",
            limit: 8000,
            line: 3,
            col: 7,
        };
        let text = err.to_string();
        assert!(text.contains("8000"));
        assert!(text.contains("line 3"));
    }
}
