//! Error types for the simulation core
//!
//! Only malformed configuration and impossible spawn requests are errors.
//! Losing a round is a phase transition, not an `Err`.

use thiserror::Error;

/// Configuration rejected at initialization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No puzzles to play
    #[error("puzzle list is empty")]
    EmptyPuzzleList,

    /// A puzzle with nothing to spell
    #[error("puzzle {index} has an empty answer")]
    EmptyAnswer { index: usize },

    /// An answer character the spawner can never produce
    #[error("puzzle {index} uses '{ch}', which is not in the alphabet")]
    CharacterOutsideAlphabet { index: usize, ch: char },

    /// A size, count or duration that must be > 0
    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    /// A value outside its legal range
    #[error("{field} out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    /// Config file could not be read or parsed
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl ConfigError {
    pub fn out_of_range(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::OutOfRange {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by round construction and ticking
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The spawner ran out of legal choices (grid full, alphabet exhausted)
    #[error("spawn invariant violated: {what} ({detail})")]
    InvariantViolation { what: &'static str, detail: String },
}

impl EngineError {
    pub fn invariant(what: &'static str, detail: impl Into<String>) -> Self {
        EngineError::InvariantViolation {
            what,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_engine_error() {
        let err: EngineError = ConfigError::EmptyPuzzleList.into();
        assert_eq!(err, EngineError::Config(ConfigError::EmptyPuzzleList));
        assert_eq!(
            err.to_string(),
            "invalid configuration: puzzle list is empty"
        );
    }

    #[test]
    fn invariant_message_names_the_resource() {
        let err = EngineError::invariant("free grid cell", "0 of 4 cells free");
        assert!(err.to_string().contains("free grid cell"));
        assert!(err.to_string().contains("0 of 4"));
    }
}
