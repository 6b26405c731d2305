//! The error taxonomy (spec §7).
//!
//! Hand-written enum with a manual `Display`/`Error` impl, the same texture
//! as the teacher's `CodeGenError` (`compiler/src/codegen/error.rs`): no
//! `thiserror`, no `anyhow` — those crates appear nowhere in the teacher's
//! `core`/`runtime`/`compiler` stack, so we don't reach for them either.
//!
//! Every non-I/O error is fatal at the top level (§7 "Propagation policy"):
//! callers propagate with `?` and the CLI driver is the only place that
//! turns an `Err` into a diagnostic line plus a process exit.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum JoyError {
    /// Malformed literal, unterminated string/char. Carries a 1-indexed line.
    Lex { message: String, line: usize },
    /// Unbalanced bracket/brace, missing `.`, definition without `==`.
    Parse { message: String, line: usize },
    /// A primitive needed more values than the stack held.
    StackUnderflow {
        primitive: String,
        needed: usize,
        had: usize,
    },
    /// A primitive's input didn't match the expected variant.
    Type {
        primitive: String,
        expected: String,
        got: String,
    },
    /// Division by zero, out-of-range escape/set element/index, mismatched
    /// aggregate kinds in a mixed op.
    Domain { message: String },
    /// Symbol not found in the dictionary, with `undeferror` on.
    UndefinedWord { name: String },
}

impl fmt::Display for JoyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoyError::Lex { message, line } => write!(f, "lex error at line {line}: {message}"),
            JoyError::Parse { message, line } => {
                write!(f, "parse error at line {line}: {message}")
            }
            JoyError::StackUnderflow {
                primitive,
                needed,
                had,
            } => write!(
                f,
                "{primitive}: stack underflow (needs {needed}, has {had})"
            ),
            JoyError::Type {
                primitive,
                expected,
                got,
            } => write!(f, "{primitive}: expected {expected}, got {got}"),
            JoyError::Domain { message } => write!(f, "{message}"),
            JoyError::UndefinedWord { name } => write!(f, "undefined word: {name}"),
        }
    }
}

impl std::error::Error for JoyError {}

impl JoyError {
    pub fn underflow(primitive: &str, needed: usize, had: usize) -> Self {
        JoyError::StackUnderflow {
            primitive: primitive.to_string(),
            needed,
            had,
        }
    }

    pub fn type_error(primitive: &str, expected: &str, got: &str) -> Self {
        JoyError::Type {
            primitive: primitive.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        JoyError::Domain {
            message: message.into(),
        }
    }
}
