//! Required field validator

use crate::error::RuleError;
use crate::traits::{ValidationRule, Verdict};
use crate::value::FieldValue;
use serde_json::Value;

/// Validator that ensures a field is present and not empty
#[derive(Debug, Clone, Default)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
}

impl RequiredValidator {
    /// Create a new required validator with default message
    pub fn new() -> Self {
        Self { message: None }
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl ValidationRule for RequiredValidator {
    fn check(&self, value: &FieldValue) -> Result<Verdict, RuleError> {
        if value.is_blank() {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| "This field is required".to_string());

            Ok(Verdict::Fail(message))
        } else {
            Ok(Verdict::Pass)
        }
    }

    fn rule_name(&self) -> &str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        self.message.as_ref().map(|msg| {
            serde_json::json!({
                "message": msg
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(validator: &RequiredValidator, value: impl Into<FieldValue>) -> Verdict {
        validator.check(&value.into()).unwrap()
    }

    #[test]
    fn test_required_validator_with_null() {
        let validator = RequiredValidator::new();
        assert_eq!(
            check(&validator, FieldValue::null()),
            Verdict::fail("This field is required")
        );
    }

    #[test]
    fn test_required_validator_with_strings() {
        let validator = RequiredValidator::new();

        assert!(!check(&validator, "").is_pass());
        assert!(!check(&validator, "   ").is_pass());
        assert!(check(&validator, "John").is_pass());
    }

    #[test]
    fn test_required_validator_with_collections() {
        let validator = RequiredValidator::new();

        assert!(!check(&validator, json!([])).is_pass());
        assert!(check(&validator, json!(["tag1"])).is_pass());
        assert!(!check(&validator, FieldValue::Many(Vec::new())).is_pass());
    }

    #[test]
    fn test_required_validator_with_custom_message() {
        let validator = RequiredValidator::with_message("This field cannot be empty");
        assert_eq!(
            check(&validator, FieldValue::null()),
            Verdict::fail("This field cannot be empty")
        );
        assert_eq!(
            validator.parameters(),
            Some(json!({ "message": "This field cannot be empty" }))
        );
    }

    #[test]
    fn test_required_validator_with_numbers_and_booleans() {
        let validator = RequiredValidator::new();

        // Zero and false are values, not absence
        assert!(check(&validator, 0).is_pass());
        assert!(check(&validator, 42).is_pass());
        assert!(check(&validator, false).is_pass());
    }
}
