use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::validation::ContentViolation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}

impl From<Result<(), ContentViolation>> for ValidationResult {
    fn from(result: Result<(), ContentViolation>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(violation) => Self::invalid(violation.to_string()),
        }
    }
}

/// `sanitized` is populated even when invalid, holding the value cleaned up to the failing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizationResult {
    pub sanitized: String,
    pub is_valid: bool,
    pub error: Option<String>,
}

impl SanitizationResult {
    pub fn valid(sanitized: String) -> Self {
        Self {
            sanitized,
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(sanitized: String, violation: ContentViolation) -> Self {
        Self {
            sanitized,
            is_valid: false,
            error: Some(violation.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSanitizationResult {
    pub sanitized: BTreeMap<String, String>,
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCountInfo {
    pub current: usize,
    pub remaining: usize,
    pub max: usize,
    pub is_over_limit: bool,
    pub percentage: f64,
}
