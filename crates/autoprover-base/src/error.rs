//! Library-wide error type for construction-time failures.
//!
//! Engine errors have no source text to point at — a
//! `KnuthBendixCompletion` or `ResolutionProver` rejects bad
//! configuration or a re-entrant call, it does not parse anything.
//! `EngineError` is a plain enum with a hand-written `Display`/`Error`
//! implementation rather than a derive-based one.

use std::fmt;

/// An error produced while constructing or driving an engine
/// (completion or resolution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A configuration value is out of its valid range (e.g. a zero
    /// iteration cap, a negative time limit).
    InvalidConfig { field: &'static str, reason: String },
    /// A method that may only run once at a time (e.g. `complete`,
    /// `prove`) was called while a previous call on the same engine
    /// instance was still in progress.
    AlreadyRunning,
    /// A symbol referenced by a term or rule was never interned.
    UnknownSymbol(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration for `{field}`: {reason}")
            }
            EngineError::AlreadyRunning => {
                write!(f, "engine is already running a proof search")
            }
            EngineError::UnknownSymbol(name) => {
                write!(f, "unknown symbol: `{name}`")
            }
        }
    }
}

impl std::error::Error for EngineError {}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_display() {
        let e = EngineError::InvalidConfig {
            field: "max_iterations",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid configuration for `max_iterations`: must be greater than zero"
        );
    }

    #[test]
    fn already_running_display() {
        assert_eq!(
            EngineError::AlreadyRunning.to_string(),
            "engine is already running a proof search"
        );
    }

    #[test]
    fn unknown_symbol_display() {
        let e = EngineError::UnknownSymbol("foo".to_string());
        assert_eq!(e.to_string(), "unknown symbol: `foo`");
    }
}
