//! Core validation traits: rules and field extensions

use crate::config::ValidationConfig;
use crate::error::{FieldErrors, RuleError, ValidationResult};
use crate::rules::Rules;
use crate::value::FieldValue;
use serde_json::Value;

/// Outcome of evaluating one rule against one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// Failure message, stored verbatim in the field's error state
    Fail(String),
}

impl Verdict {
    pub fn fail(message: impl Into<String>) -> Self {
        Verdict::Fail(message.into())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// Pass when `condition` holds, otherwise fail with `message`
    pub fn check(condition: bool, message: impl Into<String>) -> Self {
        if condition {
            Verdict::Pass
        } else {
            Verdict::fail(message)
        }
    }
}

/// A named, pure predicate over a field value.
///
/// Implementations must not have side effects: evaluating the same value
/// twice yields the same verdict. `Err` is reserved for rules that cannot
/// evaluate at all and aborts the surrounding `validate()` call.
pub trait ValidationRule: Send + Sync {
    /// Evaluate the rule against a value
    fn check(&self, value: &FieldValue) -> Result<Verdict, RuleError>;

    /// Name used when the rule is added without an explicit one
    fn rule_name(&self) -> &str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Where a validation pass is running
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub model: &'a str,
    pub field: &'a str,
    /// Association nesting depth, 0 for a top-level model
    pub depth: usize,
    pub config: &'a ValidationConfig,
}

/// Behavior attached to a field on top of its plain rule set.
///
/// Extensions are resolved once when the schema is registered and invoked
/// in declaration order on every instance.
pub trait FieldExtension: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rules contributed to the field, evaluated in the same pass as the
    /// field's own rules
    fn rules(&self) -> Rules {
        Rules::new()
    }

    /// Convert a raw attribute into the value shape this extension expects
    fn hydrate(&self, value: FieldValue) -> FieldValue {
        value
    }

    /// Post-rule step; may add entries to the field's fresh error state
    fn after_rules(
        &self,
        _value: &mut FieldValue,
        _errors: &mut FieldErrors,
        _ctx: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_helpers() {
        assert!(Verdict::Pass.is_pass());
        assert!(!Verdict::fail("nope").is_pass());
        assert_eq!(Verdict::check(true, "unused"), Verdict::Pass);
        assert_eq!(
            Verdict::check(false, "Need more assoc"),
            Verdict::Fail("Need more assoc".to_string())
        );
    }
}
