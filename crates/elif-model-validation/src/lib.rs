//! # elif-model-validation
//!
//! Declarative model validation for the elif framework. A model schema lists
//! its fields in order, each with a default value, named rules and optional
//! behavior extensions such as [`HasMany`]. Every field caches the outcome of
//! its last validation; the model-level view (`is_valid()`, `errors()`) is
//! derived from those caches on every read.
//!
//! ```
//! use elif_model_validation::{FieldDef, Model, ModelSchema, CustomValidator, Verdict};
//!
//! let schema = ModelSchema::builder("User")
//!     .field(FieldDef::new("name").rule(
//!         "isLongEnough",
//!         CustomValidator::new("isLongEnough", |value| {
//!             Verdict::check(value.len().is_some_and(|len| len > 10), "Name is not long enough")
//!         }),
//!     ))
//!     .build()?;
//!
//! let mut user = Model::new(schema, [("name", "shortname")]);
//! user.validate()?;
//! assert!(!user.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod association;
pub mod config;
pub mod error;
pub mod field;
pub mod model;
pub mod rules;
pub mod schema;
pub mod traits;
pub mod validators;
pub mod value;

// Re-exports for easy access
pub use association::HasMany;
pub use config::{ConfigError, ValidationConfig, ValidationConfigBuilder};
pub use error::{
    ErrorEntry, FieldErrors, ModelErrors, RuleError, SchemaError, SchemaResult, ValidationError,
    ValidationResult,
};
pub use field::Field;
pub use model::Model;
pub use rules::Rules;
pub use schema::{FieldDef, FieldDescriptor, ModelSchema, ModelSchemaBuilder};
pub use traits::{FieldExtension, ValidationContext, ValidationRule, Verdict};
pub use value::FieldValue;

// Built-in validators
pub use validators::{
    custom::CustomValidator,
    length::LengthValidator,
    numeric::NumericValidator,
    pattern::PatternValidator,
    required::RequiredValidator,
};
