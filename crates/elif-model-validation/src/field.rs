//! A single field: current value, shared descriptor and cached validation outcome

use crate::error::{FieldErrors, ValidationResult};
use crate::schema::FieldDescriptor;
use crate::traits::ValidationContext;
use crate::value::FieldValue;
use std::sync::Arc;

/// Per-instance state of one field.
///
/// `errors` holds the outcome of the last `validate()` call and is never
/// touched by `set_value()`. A field that was never validated has an empty
/// error state and is treated as valid.
#[derive(Debug, Clone)]
pub struct Field {
    descriptor: Arc<FieldDescriptor>,
    value: FieldValue,
    errors: FieldErrors,
}

impl Field {
    pub(crate) fn new(descriptor: Arc<FieldDescriptor>, value: FieldValue) -> Self {
        Self {
            descriptor,
            value,
            errors: FieldErrors::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Mutable access to the value; the cached error state stays as it was
    pub fn value_mut(&mut self) -> &mut FieldValue {
        &mut self.value
    }

    /// Replace the value, running it through the field's extensions the
    /// same way construction does. The cached error state stays as it was.
    pub fn set_value(&mut self, value: impl Into<FieldValue>) {
        self.value = self.descriptor.hydrate(value.into());
    }

    /// Error state recorded by the last `validate()` call
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Revalidate this field only. Sibling fields keep their cached state.
    pub fn validate(&mut self) -> ValidationResult<()> {
        self.validate_at_depth(0)
    }

    /// Evaluate all rules, run extension post-steps, then replace the cached
    /// error state. If any step fails the previous state is kept.
    pub(crate) fn validate_at_depth(&mut self, depth: usize) -> ValidationResult<()> {
        let descriptor = Arc::clone(&self.descriptor);
        let ctx = ValidationContext {
            model: descriptor.model(),
            field: descriptor.name(),
            depth,
            config: descriptor.config(),
        };

        let mut errors = descriptor.rules().evaluate(&self.value, &ctx)?;
        for extension in descriptor.extensions() {
            extension.after_rules(&mut self.value, &mut errors, &ctx)?;
        }

        self.errors = errors;
        Ok(())
    }
}
