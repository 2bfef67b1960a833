//! Validation error types and handling
//!
//! Two families live here. Data-level outcomes (`FieldErrors`, `ModelErrors`)
//! are the cached results of validation and are never raised. Operational
//! failures (`ValidationError`, `SchemaError`, `RuleError`) are returned as
//! `Err` and mean something is wrong with a rule or a schema, not with the data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A single entry in a field's error state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorEntry {
    /// Failure message returned by a rule
    Message(String),
    /// Error report of a nested model folded in by an association
    Nested(ModelErrors),
}

impl ErrorEntry {
    /// Get the failure message, if this is a rule failure
    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorEntry::Message(message) => Some(message),
            ErrorEntry::Nested(_) => None,
        }
    }

    /// Get the nested report, if this is a folded association entry
    pub fn as_nested(&self) -> Option<&ModelErrors> {
        match self {
            ErrorEntry::Message(_) => None,
            ErrorEntry::Nested(errors) => Some(errors),
        }
    }

    fn count(&self) -> usize {
        match self {
            ErrorEntry::Message(_) => 1,
            ErrorEntry::Nested(errors) => errors.total_errors(),
        }
    }
}

/// Currently failing rules of one field, keyed by rule name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: BTreeMap<String, ErrorEntry>,
}

impl FieldErrors {
    /// Create an empty error state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rule failure
    pub fn add_failure(&mut self, rule: impl Into<String>, message: impl Into<String>) {
        self.entries
            .insert(rule.into(), ErrorEntry::Message(message.into()));
    }

    /// Record a nested model's error report under a reserved slot
    pub fn add_nested(&mut self, slot: impl Into<String>, errors: ModelErrors) {
        self.entries.insert(slot.into(), ErrorEntry::Nested(errors));
    }

    /// Get the entry recorded under a rule name or slot
    pub fn get(&self, key: &str) -> Option<&ErrorEntry> {
        self.entries.get(key)
    }

    /// Get the failure message recorded for a rule
    pub fn message(&self, rule: &str) -> Option<&str> {
        self.entries.get(rule).and_then(ErrorEntry::as_message)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries (rule failures plus nested slots)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total failures, counting nested reports recursively
    pub fn total_errors(&self) -> usize {
        self.entries.values().map(ErrorEntry::count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ErrorEntry)> {
        self.entries.iter()
    }

    /// Merge another error state into this one, key by key.
    /// Entries of `other` replace entries with the same key.
    pub fn merge(&mut self, other: FieldErrors) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(String, ErrorEntry)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, ErrorEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Model-level error report: field name to that field's error state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ModelErrors {
    errors: BTreeMap<String, FieldErrors>,
}

impl ModelErrors {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field's error state. Empty states are not recorded.
    pub fn insert(&mut self, field: impl Into<String>, errors: FieldErrors) {
        if !errors.is_empty() {
            self.errors.insert(field.into(), errors);
        }
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get total number of failures across all fields, nested reports included
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(FieldErrors::total_errors).sum()
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, field: &str) -> Option<&FieldErrors> {
        self.errors.get(field)
    }

    /// Check if a specific field has errors
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.get(field).is_some_and(|e| !e.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.errors.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldErrors)> {
        self.errors.iter()
    }

    /// Merge another report into this one, merging field states by rule name
    pub fn merge(&mut self, other: ModelErrors) {
        for (field, errors) in other.errors {
            self.errors.entry(field).or_default().merge(errors);
        }
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl fmt::Display for ModelErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "No validation errors");
        }

        write!(f, "Validation failed for {} field(s):", self.errors.len())?;
        for (field, field_errors) in &self.errors {
            for (key, entry) in field_errors.iter() {
                match entry {
                    ErrorEntry::Message(message) => write!(f, "\n  {}.{}: {}", field, key, message)?,
                    ErrorEntry::Nested(nested) => write!(
                        f,
                        "\n  {}[{}]: {} nested error(s)",
                        field,
                        key,
                        nested.total_errors()
                    )?,
                }
            }
        }
        Ok(())
    }
}

/// Error raised by a rule implementation that could not evaluate a value.
///
/// This is a rule-author bug, not a validation failure; it aborts the
/// `validate()` call that triggered it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying error
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while registering a model schema or building an instance
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Empty {kind} name in model '{model}'")]
    EmptyName { model: String, kind: &'static str },

    #[error("Duplicate field '{field}' in model '{model}'")]
    DuplicateField { model: String, field: String },

    #[error("Duplicate rule '{rule}' on field '{model}.{field}'")]
    DuplicateRule {
        model: String,
        field: String,
        rule: String,
    },

    #[error("Rule name '{rule}' on field '{model}.{field}' is reserved for nested association slots")]
    ReservedRuleName {
        model: String,
        field: String,
        rule: String,
    },

    #[error("Unknown field '{field}' on model '{model}'")]
    UnknownField { model: String, field: String },

    #[error("Invalid attributes for model '{model}': expected a JSON object, found {found}")]
    InvalidAttributes { model: String, found: String },
}

impl SchemaError {
    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            model: model.into(),
            field: field.into(),
        }
    }
}

/// Errors returned from validation entry points
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Rule '{rule}' on field '{model}.{field}' failed to execute: {source}")]
    RuleExecution {
        model: String,
        field: String,
        rule: String,
        #[source]
        source: RuleError,
    },

    #[error("Association nesting depth {depth} exceeds limit {limit} in model '{model}'")]
    DepthExceeded {
        model: String,
        depth: usize,
        limit: usize,
    },

    #[error("{0}")]
    Invalid(ModelErrors),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ValidationError {
    /// Create a rule execution error
    pub fn rule_execution(
        model: impl Into<String>,
        field: impl Into<String>,
        rule: impl Into<String>,
        source: RuleError,
    ) -> Self {
        Self::RuleExecution {
            model: model.into(),
            field: field.into(),
            rule: rule.into(),
            source,
        }
    }

    /// Get the data-level report carried by `Invalid`
    pub fn model_errors(&self) -> Option<&ModelErrors> {
        match self {
            ValidationError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
