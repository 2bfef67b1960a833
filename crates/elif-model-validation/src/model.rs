//! Model instances and model-level validation aggregation
//!
//! A model owns one [`Field`] per schema field, in definition order. Whole-model
//! validation revalidates every field; `is_valid()` and `errors()` are pure
//! reads over whatever each field's cache currently holds, so a single-field
//! revalidation is reflected immediately without touching the other fields.

use crate::error::{ModelErrors, SchemaError, SchemaResult, ValidationError, ValidationResult};
use crate::field::Field;
use crate::schema::ModelSchema;
use crate::value::FieldValue;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Model {
    schema: Arc<ModelSchema>,
    fields: Vec<Field>,
}

impl Model {
    /// Build an instance from attributes. Unknown keys are ignored, missing
    /// keys take the field default.
    pub fn new<I, K, V>(schema: Arc<ModelSchema>, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut supplied: Vec<Option<FieldValue>> = vec![None; schema.fields().len()];

        for (key, value) in attributes {
            let key = key.into();
            match schema.position(&key) {
                Some(position) => {
                    let descriptor = &schema.fields()[position];
                    supplied[position] = Some(descriptor.hydrate(value.into()));
                }
                None => {
                    tracing::debug!("Ignoring unknown attribute '{}' for model '{}'", key, schema.name());
                }
            }
        }

        let fields = schema
            .fields()
            .iter()
            .zip(supplied)
            .map(|(descriptor, value)| {
                let value = value.unwrap_or_else(|| descriptor.default_value().clone());
                Field::new(Arc::clone(descriptor), value)
            })
            .collect();

        Self { schema, fields }
    }

    /// Build an instance with every field at its default
    pub fn with_defaults(schema: Arc<ModelSchema>) -> Self {
        Self::new(schema, std::iter::empty::<(String, FieldValue)>())
    }

    /// Build an instance from a JSON object of attributes
    pub fn from_json(schema: Arc<ModelSchema>, attributes: &Value) -> SchemaResult<Self> {
        let Some(object) = attributes.as_object() else {
            return Err(SchemaError::InvalidAttributes {
                model: schema.name().to_string(),
                found: json_type_name(attributes).to_string(),
            });
        };

        let attributes = object.iter().map(|(k, v)| (k.clone(), v.clone()));
        Ok(Self::new(schema, attributes))
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Fields in definition order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.schema.position(name).map(|i| &self.fields[i])
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.schema.position(name).map(|i| &mut self.fields[i])
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(Field::value)
    }

    /// Replace a field's value without revalidating it
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> SchemaResult<()> {
        self.known_field_mut(name)?.set_value(value);
        Ok(())
    }

    /// Revalidate every field in definition order
    pub fn validate(&mut self) -> ValidationResult<()> {
        self.validate_at_depth(0)
    }

    pub(crate) fn validate_at_depth(&mut self, depth: usize) -> ValidationResult<()> {
        tracing::debug!("Validating model '{}' (depth {})", self.schema.name(), depth);

        for field in &mut self.fields {
            field.validate_at_depth(depth)?;
        }

        tracing::debug!(
            "Model '{}' validated: {} field(s) failing",
            self.schema.name(),
            self.fields.iter().filter(|f| !f.is_valid()).count()
        );
        Ok(())
    }

    /// Revalidate a single field; the other fields keep their cached state
    pub fn validate_field(&mut self, name: &str) -> ValidationResult<()> {
        self.known_field_mut(name)?.validate()
    }

    /// True when no field currently has a recorded failure
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(Field::is_valid)
    }

    /// Current failures of every failing field
    pub fn errors(&self) -> ModelErrors {
        let mut errors = ModelErrors::new();
        for field in &self.fields {
            errors.insert(field.name(), field.errors().clone());
        }
        errors
    }

    /// Validate the whole model and turn failures into an `Err`
    pub fn check(&mut self) -> ValidationResult<()> {
        self.validate()?;

        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(self.errors()))
        }
    }

    fn known_field_mut(&mut self, name: &str) -> SchemaResult<&mut Field> {
        let model = self.schema.name().to_string();
        self.field_mut(name)
            .ok_or_else(|| SchemaError::unknown_field(model, name))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
