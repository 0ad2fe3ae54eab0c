use std::fmt;
use thiserror::Error;

/// Message returned to callers for an empty question
pub const EMPTY_QUESTION_MESSAGE: &str = "Question cannot be empty.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", EMPTY_QUESTION_MESSAGE)]
    Empty,
}

/// A question that has been trimmed and is known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuestion(String);

impl NormalizedQuestion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trims surrounding whitespace and rejects questions that end up empty.
///
/// No other normalization happens here: case, punctuation and Unicode forms are
/// passed to the model untouched.
pub fn validate(raw: &str) -> Result<NormalizedQuestion, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(NormalizedQuestion(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_rejected() {
        assert_eq!(validate(""), Err(ValidationError::Empty));
        assert_eq!(validate("   "), Err(ValidationError::Empty));
        assert_eq!(validate("\t\n \r\n"), Err(ValidationError::Empty));
    }

    #[test]
    fn test_trims_without_other_normalization() {
        assert_eq!(validate("  PiNg \n").unwrap().as_str(), "PiNg");
        assert_eq!(validate("???").unwrap().as_str(), "???");
        assert_eq!(
            validate(" What is 2 to the power of 5? ").unwrap().to_string(),
            "What is 2 to the power of 5?"
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(ValidationError::Empty.to_string(), "Question cannot be empty.");
    }
}
