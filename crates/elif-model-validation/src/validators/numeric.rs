//! Numeric value validators

use crate::error::RuleError;
use crate::traits::{ValidationRule, Verdict};
use crate::value::FieldValue;
use serde_json::Value;

/// Validator for numeric constraints
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
    /// Allow only integers (no decimals)
    pub integer_only: bool,
    /// Allow only positive numbers (> 0)
    pub positive_only: bool,
    /// Allow only negative numbers (< 0)
    pub negative_only: bool,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    /// Create a new numeric validator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum value constraint
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value constraint
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set value range (min and max)
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Require integer values only (no decimals)
    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    /// Allow only positive numbers (> 0)
    pub fn positive_only(mut self, positive_only: bool) -> Self {
        self.positive_only = positive_only;
        if positive_only {
            self.negative_only = false;
        }
        self
    }

    /// Allow only negative numbers (< 0)
    pub fn negative_only(mut self, negative_only: bool) -> Self {
        self.negative_only = negative_only;
        if negative_only {
            self.positive_only = false;
        }
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Extract a number from numbers and numeric strings
    fn get_numeric_value(value: &FieldValue) -> Option<f64> {
        match value.as_json()? {
            Value::Number(num) => num.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// First violated constraint, if any
    fn violation(&self, num: f64) -> Option<String> {
        if self.integer_only && num.fract() != 0.0 {
            return Some("Must be an integer".to_string());
        }
        if self.positive_only && num <= 0.0 {
            return Some("Must be a positive number".to_string());
        }
        if self.negative_only && num >= 0.0 {
            return Some("Must be a negative number".to_string());
        }

        let below = self.min.is_some_and(|min| num < min);
        let above = self.max.is_some_and(|max| num > max);
        if !below && !above {
            return None;
        }

        Some(match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => format!("Must equal {}", min),
            (Some(min), Some(max)) => format!("Must be between {} and {}", min, max),
            (Some(min), None) => format!("Must be at least {}", min),
            (None, Some(max)) => format!("Must be at most {}", max),
            (None, None) => format!("Invalid numeric value: {}", num),
        })
    }
}

impl ValidationRule for NumericValidator {
    fn check(&self, value: &FieldValue) -> Result<Verdict, RuleError> {
        // Skip validation for null values
        if value.is_null() {
            return Ok(Verdict::Pass);
        }

        let Some(num) = Self::get_numeric_value(value) else {
            return Ok(Verdict::fail("Must be a numeric value"));
        };

        if !num.is_finite() {
            return Ok(Verdict::fail("Must be a finite number"));
        }

        match self.violation(num) {
            None => Ok(Verdict::Pass),
            Some(default_message) => Ok(Verdict::Fail(
                self.message.clone().unwrap_or(default_message),
            )),
        }
    }

    fn rule_name(&self) -> &str {
        "numeric"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        params.insert("integer_only".to_string(), Value::Bool(self.integer_only));
        params.insert("positive_only".to_string(), Value::Bool(self.positive_only));
        params.insert("negative_only".to_string(), Value::Bool(self.negative_only));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}
