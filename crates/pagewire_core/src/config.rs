//! Page wiring configuration.
//!
//! # Responsibility
//! - Name the host elements page logic binds to.
//! - Carry the status-region hidden class, auto-clear delay and validation
//!   bounds.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - `validate()` must pass before a config is used for wiring.

use crate::model::validation::ValidationRules;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_ERROR_AUTO_CLEAR_MS: u64 = 5000;
pub const DEFAULT_HIDDEN_CLASS: &str = "hidden";

static ELEMENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid element id regex"));
static CLASS_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_-][A-Za-z0-9_-]*$").expect("valid class token regex"));

/// Identifiers of the well-known page elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub simulate_click: String,
    pub user_form: String,
    pub user_input: String,
    pub dynamic_content: String,
    pub error_message: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            simulate_click: "simulate-click".to_string(),
            user_form: "user-form".to_string(),
            user_input: "user-input".to_string(),
            dynamic_content: "dynamic-content".to_string(),
            error_message: "error-message".to_string(),
        }
    }
}

impl ElementIds {
    fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("simulateClick", self.simulate_click.as_str()),
            ("userForm", self.user_form.as_str()),
            ("userInput", self.user_input.as_str()),
            ("dynamicContent", self.dynamic_content.as_str()),
            ("errorMessage", self.error_message.as_str()),
        ]
    }
}

/// Full page wiring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub element_ids: ElementIds,
    /// Class toggled on the status region while no error is shown.
    pub hidden_class: String,
    pub error_auto_clear_ms: u64,
    pub validation: ValidationRules,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            element_ids: ElementIds::default(),
            hidden_class: DEFAULT_HIDDEN_CLASS.to_string(),
            error_auto_clear_ms: DEFAULT_ERROR_AUTO_CLEAR_MS,
            validation: ValidationRules::default(),
        }
    }
}

impl PageConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn error_auto_clear(&self) -> Duration {
        Duration::from_millis(self.error_auto_clear_ms)
    }

    /// Checks identifiers, class token and validation bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.element_ids.named() {
            if !ELEMENT_ID_RE.is_match(value) {
                return Err(ConfigError::InvalidElementId {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if !CLASS_TOKEN_RE.is_match(&self.hidden_class) {
            return Err(ConfigError::InvalidClassName(self.hidden_class.clone()));
        }
        let rules = self.validation;
        if rules.min_chars == 0 || rules.min_chars > rules.max_chars {
            return Err(ConfigError::InvalidBounds {
                min: rules.min_chars,
                max: rules.max_chars,
            });
        }
        Ok(())
    }
}

/// Configuration load/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    InvalidElementId { field: &'static str, value: String },
    InvalidClassName(String),
    InvalidBounds { min: usize, max: usize },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "invalid page config: {details}"),
            Self::InvalidElementId { field, value } => {
                write!(f, "element id `{field}` is not a valid identifier: `{value}`")
            }
            Self::InvalidClassName(value) => {
                write!(f, "hidden class must be a single class token, got `{value}`")
            }
            Self::InvalidBounds { min, max } => write!(
                f,
                "validation bounds must satisfy 1 <= min <= max, got min={min} max={max}"
            ),
        }
    }
}

impl Error for ConfigError {}
