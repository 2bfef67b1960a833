//! Pattern-based validators using regular expressions

use crate::error::RuleError;
use crate::traits::{ValidationRule, Verdict};
use crate::value::FieldValue;
use regex::Regex;
use serde_json::Value;

/// Validator for custom regular expression patterns
#[derive(Debug, Clone)]
pub struct PatternValidator {
    /// The regular expression pattern
    pattern: Regex,
    /// The same pattern anchored at both ends, used in full-match mode
    anchored: Regex,
    /// Custom error message
    pub message: Option<String>,
    /// Whether to match the entire string (default) or just find a match
    pub full_match: bool,
    /// Case-sensitive matching (default: true)
    pub case_sensitive: bool,
}

impl PatternValidator {
    /// Create a new pattern validator
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::from_regex(Regex::new(pattern)?)
    }

    /// Create a case-insensitive pattern validator
    pub fn new_case_insensitive(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("(?i){}", pattern))?;
        Ok(Self {
            case_sensitive: false,
            ..Self::from_regex(regex)?
        })
    }

    /// Create a validator from an existing Regex
    pub fn from_regex(regex: Regex) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!(r"^(?:{})$", regex.as_str()))?;

        Ok(Self {
            pattern: regex,
            anchored,
            message: None,
            full_match: true,
            case_sensitive: true,
        })
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set whether to match the full string or just find a match
    pub fn full_match(mut self, full_match: bool) -> Self {
        self.full_match = full_match;
        self
    }

    /// Get the pattern string
    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    fn matches(&self, text: &str) -> bool {
        if self.full_match {
            self.anchored.is_match(text)
        } else {
            self.pattern.is_match(text)
        }
    }

    fn preset(pattern: &str, message: &str) -> Self {
        Self::new(pattern).expect("built-in pattern is valid").message(message)
    }

    /// Letters and digits only
    pub fn alphanumeric() -> Self {
        Self::preset(r"^[a-zA-Z0-9]+$", "Must contain only letters and numbers")
    }

    /// Lowercase words separated by single hyphens
    pub fn slug() -> Self {
        Self::preset(
            r"^[a-z0-9]+(?:-[a-z0-9]+)*$",
            "Must be a valid slug (lowercase letters, numbers, and hyphens)",
        )
    }

    /// `#RRGGBB` color codes
    pub fn hex_color() -> Self {
        Self::preset(
            r"^#[0-9a-fA-F]{6}$",
            "Must be a valid hex color code (e.g., #FF5733)",
        )
    }
}

impl ValidationRule for PatternValidator {
    fn check(&self, value: &FieldValue) -> Result<Verdict, RuleError> {
        // Skip validation for null values
        if value.is_null() {
            return Ok(Verdict::Pass);
        }

        let Some(text) = value.as_str() else {
            return Ok(Verdict::Fail(format!(
                "Expected a string for pattern validation, found {}",
                value.type_name()
            )));
        };

        if self.matches(text) {
            return Ok(Verdict::Pass);
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "Does not match the required pattern".to_string());
        Ok(Verdict::Fail(message))
    }

    fn rule_name(&self) -> &str {
        "pattern"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert("pattern".to_string(), Value::String(self.pattern.as_str().to_string()));
        params.insert("full_match".to_string(), Value::Bool(self.full_match));
        params.insert("case_sensitive".to_string(), Value::Bool(self.case_sensitive));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(validator: &PatternValidator, value: impl Into<FieldValue>) -> bool {
        validator.check(&value.into()).unwrap().is_pass()
    }

    #[test]
    fn test_pattern_validator_basic() {
        let validator = PatternValidator::new(r"\d{3}-\d{4}").unwrap();

        assert!(passes(&validator, "555-1234"));
        assert!(!passes(&validator, "5551234"));
    }

    #[test]
    fn test_pattern_validator_full_match() {
        let full = PatternValidator::new(r"\d+").unwrap();
        assert!(passes(&full, "123"));
        assert!(!passes(&full, "abc123def"));

        let partial = PatternValidator::new(r"\d+").unwrap().full_match(false);
        assert!(passes(&partial, "abc123def"));
    }

    #[test]
    fn test_full_match_considers_every_alternative() {
        let validator = PatternValidator::new("a|ab").unwrap();

        assert!(passes(&validator, "a"));
        assert!(passes(&validator, "ab"));
        assert!(!passes(&validator, "abc"));
        assert_eq!(validator.pattern_string(), "a|ab");

        let from_regex = PatternValidator::from_regex(Regex::new("x|xy").unwrap()).unwrap();
        assert!(passes(&from_regex, "xy"));
    }

    #[test]
    fn test_pattern_validator_case_insensitive() {
        let validator = PatternValidator::new_case_insensitive("hello").unwrap();

        assert!(!validator.case_sensitive);
        assert!(passes(&validator, "HELLO"));
        assert!(passes(&validator, "Hello"));
        assert!(!passes(&validator, "goodbye"));
    }

    #[test]
    fn test_pattern_validator_presets() {
        assert!(passes(&PatternValidator::alphanumeric(), "abc123"));
        assert!(!passes(&PatternValidator::alphanumeric(), "abc-123"));
        assert!(passes(&PatternValidator::slug(), "my-first-post"));
        assert!(!passes(&PatternValidator::slug(), "My Post"));
        assert!(passes(&PatternValidator::hex_color(), "#FF5733"));
        assert!(!passes(&PatternValidator::hex_color(), "FF5733"));
    }

    #[test]
    fn test_pattern_validator_messages() {
        let validator = PatternValidator::new(r"[a-z]+").unwrap();
        assert_eq!(
            validator.check(&FieldValue::from("ABC")).unwrap(),
            Verdict::fail("Does not match the required pattern")
        );

        let validator = validator.message("Lowercase only");
        assert_eq!(
            validator.check(&FieldValue::from("ABC")).unwrap(),
            Verdict::fail("Lowercase only")
        );
    }

    #[test]
    fn test_pattern_validator_null_and_invalid_type() {
        let validator = PatternValidator::alphanumeric();

        assert!(passes(&validator, FieldValue::null()));
        assert_eq!(
            validator.check(&FieldValue::from(42)).unwrap(),
            Verdict::fail("Expected a string for pattern validation, found number")
        );
    }
}
