use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;

pub const VALIDATION_FAILED: &str = "Validation failed";

/// JSON body the mail relay answers with, for success and failure alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    /// Keyed by canonical field name (`firstName`, `email`, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, String>,
}

impl ContactResponse {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn rejected(result: &ValidationResult) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED.to_string(),
            errors: result.messages(),
            field_errors: result.to_field_errors(),
        }
    }

    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}
