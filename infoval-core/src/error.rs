//! Structured error types for infoval.

use thiserror::Error;

/// Unified error type for all infoval operations.
///
/// Only malformed input is reported here. Numeric degeneracy such as a
/// sample with a single class is not an error: the affected statistics
/// come back as NaN.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InfovalError {
    /// Paired sequences differ in length.
    #[error("length mismatch: {actuals} actuals vs {scores} scores")]
    LengthMismatch {
        /// Length of the actuals (or categories) sequence.
        actuals: usize,
        /// Length of the scores (or outcomes) sequence.
        scores: usize,
    },

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout infoval.
pub type Result<T> = std::result::Result<T, InfovalError>;

/// Fail with [`InfovalError::LengthMismatch`] unless both lengths agree.
pub fn ensure_same_length(actuals: usize, scores: usize) -> Result<()> {
    if actuals != scores {
        return Err(InfovalError::LengthMismatch { actuals, scores });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message() {
        let err = InfovalError::LengthMismatch {
            actuals: 3,
            scores: 2,
        };
        assert_eq!(err.to_string(), "length mismatch: 3 actuals vs 2 scores");
    }

    #[test]
    fn invalid_input_message() {
        let err = InfovalError::InvalidInput("step must be positive".into());
        assert_eq!(err.to_string(), "invalid input: step must be positive");
    }

    #[test]
    fn ensure_same_length_ok() {
        assert!(ensure_same_length(4, 4).is_ok());
    }

    #[test]
    fn ensure_same_length_err() {
        assert_eq!(
            ensure_same_length(4, 5),
            Err(InfovalError::LengthMismatch {
                actuals: 4,
                scores: 5
            })
        );
    }
}
