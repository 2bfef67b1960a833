//! Named rule sets and their evaluation

use crate::error::{FieldErrors, ValidationError, ValidationResult};
use crate::traits::{ValidationContext, ValidationRule, Verdict};
use crate::validators::{LengthValidator, NumericValidator, RequiredValidator};
use crate::value::FieldValue;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
struct NamedRule {
    name: String,
    rule: Arc<dyn ValidationRule>,
}

/// Ordered collection of named validation rules for one field
#[derive(Clone, Default)]
pub struct Rules {
    rules: Vec<NamedRule>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules").field("rules", &self.describe()).finish()
    }
}

impl Rules {
    /// Create a new empty rules collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule under an explicit name
    pub fn add<R>(mut self, name: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.push(name, Arc::new(rule));
        self
    }

    /// Add a rule under its own `rule_name()`
    pub fn rule<R>(self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        let name = rule.rule_name().to_string();
        self.add(name, rule)
    }

    /// Add a shared rule under an explicit name
    pub fn push(&mut self, name: impl Into<String>, rule: Arc<dyn ValidationRule>) {
        self.rules.push(NamedRule {
            name: name.into(),
            rule,
        });
    }

    /// Append every rule of `other`, keeping its order
    pub fn extend(&mut self, other: Rules) {
        self.rules.extend(other.rules);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ValidationRule>> {
        self.rules.iter().find(|r| r.name == name).map(|r| &r.rule)
    }

    /// Rule names in evaluation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// JSON listing of every rule in order: its name, kind and parameters
    pub fn describe(&self) -> Value {
        Value::Array(
            self.rules
                .iter()
                .map(|NamedRule { name, rule }| {
                    json!({
                        "name": name,
                        "rule": rule.rule_name(),
                        "parameters": rule.parameters(),
                    })
                })
                .collect(),
        )
    }

    /// Evaluate every rule against `value` and build a fresh error state
    /// holding exactly the rules that failed.
    pub fn evaluate(
        &self,
        value: &FieldValue,
        ctx: &ValidationContext<'_>,
    ) -> ValidationResult<FieldErrors> {
        let mut errors = FieldErrors::new();

        for NamedRule { name, rule } in &self.rules {
            let verdict = rule.check(value).map_err(|source| {
                tracing::warn!(
                    "Rule '{}' on field '{}.{}' failed to execute: {}",
                    name,
                    ctx.model,
                    ctx.field,
                    source
                );
                ValidationError::rule_execution(ctx.model, ctx.field, name.as_str(), source)
            })?;

            if let Verdict::Fail(message) = verdict {
                tracing::trace!("{}.{} failed rule '{}': {}", ctx.model, ctx.field, name, message);
                errors.add_failure(name.as_str(), message);

                if *ctx.config.get_fail_fast() {
                    break;
                }
            }
        }

        Ok(errors)
    }

    /// Rules for a required string field with optional length bounds
    pub fn required_string(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        let rules = Self::new().rule(RequiredValidator::new());

        if min_length.is_none() && max_length.is_none() {
            return rules;
        }

        let mut length = LengthValidator::new();
        if let Some(min) = min_length {
            length = length.min(min);
        }
        if let Some(max) = max_length {
            length = length.max(max);
        }
        rules.rule(length)
    }

    /// Rules for a required numeric field with optional bounds
    pub fn required_number(min: Option<f64>, max: Option<f64>) -> Self {
        let mut numeric = NumericValidator::new();
        if let Some(min) = min {
            numeric = numeric.min(min);
        }
        if let Some(max) = max {
            numeric = numeric.max(max);
        }

        Self::new().rule(RequiredValidator::new()).rule(numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ValidationConfig, ValidationConfigBuilder};
    use crate::error::RuleError;
    use crate::validators::CustomValidator;

    fn ctx(config: &ValidationConfig) -> ValidationContext<'_> {
        ValidationContext {
            model: "Test",
            field: "name",
            depth: 0,
            config,
        }
    }

    fn long_enough() -> CustomValidator {
        CustomValidator::new("isLongEnough", |value| {
            Verdict::check(value.len().is_some_and(|len| len > 10), "Name is not long enough")
        })
    }

    #[test]
    fn test_rules_keep_declaration_order() {
        let rules = Rules::new()
            .add("isLongEnough", long_enough())
            .rule(RequiredValidator::new())
            .rule(LengthValidator::new().max(3));

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.names().collect::<Vec<_>>(), vec!["isLongEnough", "required", "length"]);
        assert!(rules.get("required").is_some());
        assert!(rules.get("missing").is_none());
    }

    #[test]
    fn test_evaluate_records_only_failures() {
        let config = ValidationConfig::default();
        let rules = Rules::new()
            .add("isLongEnough", long_enough())
            .rule(RequiredValidator::new());

        let errors = rules.evaluate(&FieldValue::from("shortname"), &ctx(&config)).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message("isLongEnough"), Some("Name is not long enough"));

        let errors = rules
            .evaluate(&FieldValue::from("a very long name"), &ctx(&config))
            .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_describe_lists_rule_parameters() {
        let rules = Rules::new()
            .add("isLongEnough", long_enough())
            .rule(LengthValidator::new().range(1, 3));

        assert_eq!(
            rules.describe(),
            json!([
                {
                    "name": "isLongEnough",
                    "rule": "isLongEnough",
                    "parameters": { "name": "isLongEnough" }
                },
                {
                    "name": "length",
                    "rule": "length",
                    "parameters": { "min": 1, "max": 3 }
                }
            ])
        );
        assert!(format!("{:?}", rules).contains("isLongEnough"));
    }

    #[test]
    fn test_empty_rules_always_pass() {
        let config = ValidationConfig::default();
        let errors = Rules::new().evaluate(&FieldValue::null(), &ctx(&config)).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_fail_fast_stops_after_first_failure() {
        let config = ValidationConfigBuilder::new()
            .fail_fast(true)
            .build()
            .expect("Failed to build config");
        let rules = Rules::new()
            .rule(RequiredValidator::new())
            .add("isLongEnough", long_enough());

        let errors = rules.evaluate(&FieldValue::from(""), &ctx(&config)).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("required"));
    }

    #[test]
    fn test_rule_execution_error_propagates() {
        let config = ValidationConfig::default();
        let rules = Rules::new().add(
            "explodes",
            CustomValidator::try_new("explodes", |_| Err(RuleError::new("boom"))),
        );

        let error = rules.evaluate(&FieldValue::from("x"), &ctx(&config)).unwrap_err();
        match error {
            ValidationError::RuleExecution { field, rule, .. } => {
                assert_eq!(field, "name");
                assert_eq!(rule, "explodes");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_required_string_preset() {
        let config = ValidationConfig::default();
        let rules = Rules::required_string(Some(2), Some(50));

        assert!(rules.evaluate(&FieldValue::from("John"), &ctx(&config)).unwrap().is_empty());

        let errors = rules.evaluate(&FieldValue::from(""), &ctx(&config)).unwrap();
        assert!(errors.contains("required"));

        let errors = rules.evaluate(&FieldValue::from("J"), &ctx(&config)).unwrap();
        assert!(errors.contains("length"));
    }

    #[test]
    fn test_required_number_preset() {
        let config = ValidationConfig::default();
        let rules = Rules::required_number(Some(18.0), Some(120.0));

        assert!(rules.evaluate(&FieldValue::from(25), &ctx(&config)).unwrap().is_empty());
        assert!(rules.evaluate(&FieldValue::from(15), &ctx(&config)).unwrap().contains("numeric"));
        assert!(rules.evaluate(&FieldValue::null(), &ctx(&config)).unwrap().contains("required"));
    }
}
