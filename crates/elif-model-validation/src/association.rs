//! HasMany association - a field holding an ordered collection of nested models

use crate::error::{FieldErrors, ValidationError, ValidationResult};
use crate::model::Model;
use crate::rules::Rules;
use crate::schema::ModelSchema;
use crate::traits::{FieldExtension, ValidationContext, Verdict};
use crate::validators::{CustomValidator, LengthValidator};
use crate::value::FieldValue;
use serde_json::Value;
use std::sync::Arc;

/// Field extension for one-to-many associations.
///
/// Each nested model is validated with its own schema after the field's
/// rules have run. Every invalid nested model has its error report folded
/// into the parent field's error state under its index (`"0"`, `"1"`, ...).
///
/// A value that could not be hydrated into models, such as an array mixing
/// objects and scalars, fails the `isModelList` rule instead of being skipped.
#[derive(Debug, Clone)]
pub struct HasMany {
    related: Arc<ModelSchema>,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

impl HasMany {
    pub fn new(related: Arc<ModelSchema>) -> Self {
        Self {
            related,
            min_items: None,
            max_items: None,
        }
    }

    /// Require at least `min` nested models (rule `minItems`)
    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Allow at most `max` nested models (rule `maxItems`)
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn related(&self) -> &Arc<ModelSchema> {
        &self.related
    }
}

impl FieldExtension for HasMany {
    fn name(&self) -> &'static str {
        "has_many"
    }

    fn rules(&self) -> Rules {
        let related = self.related.name().to_string();
        let mut rules = Rules::new().add(
            "isModelList",
            CustomValidator::new("isModelList", move |value| {
                Verdict::check(
                    value.is_null() || value.as_models().is_some(),
                    format!("Expected a list of {} models", related),
                )
            }),
        );

        if let Some(min) = self.min_items {
            rules = rules.add(
                "minItems",
                LengthValidator::new()
                    .min(min)
                    .message(format!("Must contain at least {} item(s)", min)),
            );
        }
        if let Some(max) = self.max_items {
            rules = rules.add(
                "maxItems",
                LengthValidator::new()
                    .max(max)
                    .message(format!("Must contain at most {} item(s)", max)),
            );
        }

        rules
    }

    fn hydrate(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Json(Value::Array(items)) if items.iter().all(Value::is_object) => {
                let models = items
                    .into_iter()
                    .map(|item| Model::new(Arc::clone(&self.related), item_attributes(item)))
                    .collect();
                FieldValue::Many(models)
            }
            other => other,
        }
    }

    fn after_rules(
        &self,
        value: &mut FieldValue,
        errors: &mut FieldErrors,
        ctx: &ValidationContext<'_>,
    ) -> ValidationResult<()> {
        if !*ctx.config.get_validate_associations() {
            return Ok(());
        }
        let Some(models) = value.as_models_mut() else {
            return Ok(());
        };
        if models.is_empty() {
            return Ok(());
        }

        let depth = ctx.depth + 1;
        if depth > *ctx.config.get_max_depth() {
            tracing::warn!(
                "Refusing to validate associations of '{}.{}' at depth {} (limit {})",
                ctx.model,
                ctx.field,
                depth,
                *ctx.config.get_max_depth()
            );
            return Err(ValidationError::DepthExceeded {
                model: ctx.model.to_string(),
                depth,
                limit: *ctx.config.get_max_depth(),
            });
        }

        for (index, model) in models.iter_mut().enumerate() {
            model.validate_at_depth(depth)?;

            if !model.is_valid() {
                tracing::trace!(
                    "Folding errors of {}[{}] ({}) into '{}.{}'",
                    ctx.field,
                    index,
                    model.name(),
                    ctx.model,
                    ctx.field
                );
                errors.add_nested(index.to_string(), model.errors());
            }
        }

        Ok(())
    }
}

fn item_attributes(item: Value) -> serde_json::Map<String, Value> {
    match item {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
