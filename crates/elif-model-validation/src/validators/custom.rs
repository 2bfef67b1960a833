//! Custom validation functions and closures

use crate::error::RuleError;
use crate::traits::{ValidationRule, Verdict};
use crate::value::FieldValue;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for rule functions
pub type RuleFn = Arc<dyn Fn(&FieldValue) -> Result<Verdict, RuleError> + Send + Sync>;

/// Custom validator that accepts user-defined validation functions
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator
    pub name: String,
    validator: RuleFn,
    /// Replaces the failure message returned by the function
    pub message: Option<String>,
}

impl CustomValidator {
    /// Create a custom validator from an infallible function
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&FieldValue) -> Verdict + Send + Sync + 'static,
    {
        Self::try_new(name, move |value| Ok(validator(value)))
    }

    /// Create a custom validator from a function that may fail to evaluate
    pub fn try_new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&FieldValue) -> Result<Verdict, RuleError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
            message: None,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the validator name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// String value must be one of `allowed`
    pub fn one_of(name: impl Into<String>, allowed_values: Vec<String>) -> Self {
        Self::new(name, move |value| match value.as_str() {
            Some(s) if allowed_values.iter().any(|a| a == s) => Verdict::Pass,
            Some(_) => Verdict::Fail(format!("Must be one of: {}", allowed_values.join(", "))),
            None => Verdict::fail("Must be a string"),
        })
    }

    /// String value must not be one of `forbidden`; non-strings pass
    pub fn not_one_of(name: impl Into<String>, forbidden_values: Vec<String>) -> Self {
        Self::new(name, move |value| match value.as_str() {
            Some(s) if forbidden_values.iter().any(|f| f == s) => {
                Verdict::Fail(format!("Cannot be one of: {}", forbidden_values.join(", ")))
            }
            _ => Verdict::Pass,
        })
    }

    /// String value must contain `substring`
    pub fn contains(name: impl Into<String>, substring: String) -> Self {
        Self::new(name, move |value| match value.as_str() {
            Some(s) => Verdict::check(s.contains(&substring), format!("Must contain '{}'", substring)),
            None => Verdict::fail("Must be a string"),
        })
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn check(&self, value: &FieldValue) -> Result<Verdict, RuleError> {
        let verdict = (self.validator)(value)?;

        match (verdict, &self.message) {
            (Verdict::Fail(_), Some(custom_message)) => Ok(Verdict::Fail(custom_message.clone())),
            (verdict, _) => Ok(verdict),
        }
    }

    fn rule_name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert("name".to_string(), Value::String(self.name.clone()));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}
