//! Text input validation.
//!
//! # Responsibility
//! - Classify submitted text as accepted or rejected with a reason.
//! - Provide the single rule set shared by `validate_input` and the form
//!   submission handler.
//!
//! # Invariants
//! - Checks run in order: empty, too short, too long.
//! - Length is measured on the trimmed value, in Unicode scalar values.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_MIN_CHARS: usize = 3;
pub const DEFAULT_MAX_CHARS: usize = 50;

/// Length bounds applied to trimmed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl ValidationRules {
    /// Checks `value` against these bounds.
    ///
    /// # Errors
    /// - `Empty` when the value is empty or whitespace-only.
    /// - `TooShort` / `TooLong` when the trimmed length is out of bounds.
    pub fn check(&self, value: &str) -> Result<(), InputValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InputValidationError::Empty);
        }
        let length = trimmed.chars().count();
        if length < self.min_chars {
            return Err(InputValidationError::TooShort {
                min: self.min_chars,
                actual: length,
            });
        }
        if length > self.max_chars {
            return Err(InputValidationError::TooLong {
                max: self.max_chars,
                actual: length,
            });
        }
        Ok(())
    }

    pub fn validate(&self, value: &str) -> ValidationResult {
        self.check(value).into()
    }
}

/// Rejection reason for submitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputValidationError {
    Empty,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
}

impl InputValidationError {
    /// Reason reported by `validate_input`.
    pub fn reason(&self) -> String {
        match self {
            Self::Empty => "Input cannot be empty".to_string(),
            Self::TooShort { min, .. } => format!("Input must be at least {min} characters"),
            Self::TooLong { max, .. } => format!("Input cannot exceed {max} characters"),
        }
    }

    /// Message shown in the status region when a form submission is rejected.
    pub fn submission_message(&self) -> String {
        match self {
            Self::Empty => "Please enter some text before submitting.".to_string(),
            Self::TooShort { min, .. } => format!("Input must be at least {min} characters long."),
            Self::TooLong { max, .. } => format!("Input cannot exceed {max} characters."),
        }
    }
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason())
    }
}

impl Error for InputValidationError {}

/// Transient validation outcome, shaped for host bridges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }
}

impl From<Result<(), InputValidationError>> for ValidationResult {
    fn from(value: Result<(), InputValidationError>) -> Self {
        match value {
            Ok(()) => Self::valid(),
            Err(err) => Self {
                is_valid: false,
                reason: Some(err.reason()),
            },
        }
    }
}

/// Validates `value` with the default 3..=50 character bounds.
pub fn validate_input(value: &str) -> ValidationResult {
    ValidationRules::default().validate(value)
}
