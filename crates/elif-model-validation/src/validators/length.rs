//! Length-based validators for strings and collections

use crate::error::RuleError;
use crate::traits::{ValidationRule, Verdict};
use crate::value::FieldValue;
use serde_json::Value;

/// Validator for string/array/collection length constraints
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Exact length required
    pub exact: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set exact length requirement
    pub fn exact(mut self, exact: usize) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Set length range (min and max)
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn is_satisfied(&self, length: usize) -> bool {
        if let Some(exact) = self.exact {
            return length == exact;
        }

        self.min.map_or(true, |min| length >= min) && self.max.map_or(true, |max| length <= max)
    }

    /// Generate appropriate error message based on constraints
    fn create_error_message(&self, actual_length: usize) -> String {
        if let Some(ref custom_message) = self.message {
            return custom_message.clone();
        }

        if let Some(exact) = self.exact {
            return format!("Must be exactly {} long", exact);
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => format!("Must be exactly {} long", min),
            (Some(min), Some(max)) => format!("Must be between {} and {} long", min, max),
            (Some(min), None) => format!("Must be at least {} long", min),
            (None, Some(max)) => format!("Must be at most {} long", max),
            (None, None) => format!("Invalid length: {}", actual_length),
        }
    }
}

impl ValidationRule for LengthValidator {
    fn check(&self, value: &FieldValue) -> Result<Verdict, RuleError> {
        // Null is left to RequiredValidator
        if value.is_null() {
            return Ok(Verdict::Pass);
        }

        let Some(length) = value.len() else {
            return Ok(Verdict::Fail(format!(
                "Expected a string or collection for length validation, found {}",
                value.type_name()
            )));
        };

        if self.is_satisfied(length) {
            Ok(Verdict::Pass)
        } else {
            Ok(Verdict::Fail(self.create_error_message(length)))
        }
    }

    fn rule_name(&self) -> &str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(exact) = self.exact {
            params.insert("exact".to_string(), Value::from(exact));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passes(validator: &LengthValidator, value: impl Into<FieldValue>) -> bool {
        validator.check(&value.into()).unwrap().is_pass()
    }

    #[test]
    fn test_length_validator_min_constraint() {
        let validator = LengthValidator::new().min(3);

        assert!(!passes(&validator, "hi"));
        assert!(passes(&validator, "bob"));
        assert!(passes(&validator, "alice"));
    }

    #[test]
    fn test_length_validator_max_constraint() {
        let validator = LengthValidator::new().max(5);

        assert!(passes(&validator, "hello"));
        assert!(!passes(&validator, "hello world"));
    }

    #[test]
    fn test_length_validator_exact_constraint() {
        let validator = LengthValidator::new().exact(4);

        assert!(passes(&validator, "test"));
        assert!(!passes(&validator, "hi"));
        assert!(!passes(&validator, "testing"));
        assert_eq!(
            validator.check(&FieldValue::from("hi")).unwrap(),
            Verdict::fail("Must be exactly 4 long")
        );
    }

    #[test]
    fn test_length_validator_with_arrays_and_collections() {
        let validator = LengthValidator::new().range(2, 4);

        assert!(!passes(&validator, json!(["tag1"])));
        assert!(passes(&validator, json!(["tag1", "tag2"])));
        assert!(!passes(&validator, json!(["1", "2", "3", "4", "5"])));
        assert!(!passes(&validator, FieldValue::Many(Vec::new())));
    }

    #[test]
    fn test_length_validator_unicode_support() {
        let validator = LengthValidator::new().max(5);

        assert!(passes(&validator, "café"));
        assert!(passes(&validator, "🦀🚀✨"));
        assert!(!passes(&validator, "🦀🚀✨🎉🔥💯"));
    }

    #[test]
    fn test_length_validator_with_null() {
        let validator = LengthValidator::new().min(1);
        assert!(passes(&validator, FieldValue::null()));
    }

    #[test]
    fn test_length_validator_invalid_type_is_a_failure() {
        let validator = LengthValidator::new().min(1);
        assert_eq!(
            validator.check(&FieldValue::from(42)).unwrap(),
            Verdict::fail("Expected a string or collection for length validation, found number")
        );
    }

    #[test]
    fn test_length_validator_custom_message() {
        let validator = LengthValidator::new().min(8).message("Password must be strong");

        assert_eq!(
            validator.check(&FieldValue::from("weak")).unwrap(),
            Verdict::fail("Password must be strong")
        );
    }

    #[test]
    fn test_length_validator_parameters() {
        assert_eq!(LengthValidator::new().parameters(), None);
        assert_eq!(
            LengthValidator::new().range(1, 3).parameters(),
            Some(json!({ "min": 1, "max": 3 }))
        );
    }
}
