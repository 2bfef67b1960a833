//! Static model schemas: ordered field descriptors resolved once at registration

use crate::config::ValidationConfig;
use crate::error::{SchemaError, SchemaResult};
use crate::rules::Rules;
use crate::traits::{FieldExtension, ValidationRule};
use crate::value::FieldValue;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Definition of one field, as written by the model author
pub struct FieldDef {
    name: String,
    default: FieldValue,
    rules: Rules,
    extensions: Vec<Arc<dyn FieldExtension>>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: FieldValue::null(),
            rules: Rules::new(),
            extensions: Vec::new(),
        }
    }

    /// Value used when the attribute is not supplied
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = value.into();
        self
    }

    /// Add a named rule
    pub fn rule<R>(mut self, name: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules = self.rules.add(name, rule);
        self
    }

    /// Add every rule of a prepared set
    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Attach a behavior extension
    pub fn extension<E>(mut self, extension: E) -> Self
    where
        E: FieldExtension + 'static,
    {
        self.extensions.push(Arc::new(extension));
        self
    }
}

/// Resolved, immutable description of a field shared by all instances
pub struct FieldDescriptor {
    model: String,
    name: String,
    default: FieldValue,
    rules: Rules,
    extensions: Vec<Arc<dyn FieldExtension>>,
    config: ValidationConfig,
}

impl std::fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("model", &self.model)
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field(
                "extensions",
                &self.extensions.iter().map(|e| e.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FieldDescriptor {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &FieldValue {
        &self.default
    }

    /// Own rules followed by extension-contributed rules
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn extensions(&self) -> &[Arc<dyn FieldExtension>] {
        &self.extensions
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run a raw attribute through every extension's hydrate hook
    pub(crate) fn hydrate(&self, value: FieldValue) -> FieldValue {
        self.extensions
            .iter()
            .fold(value, |value, extension| extension.hydrate(value))
    }
}

/// Field layout of a model type
#[derive(Debug)]
pub struct ModelSchema {
    name: String,
    fields: Vec<Arc<FieldDescriptor>>,
    index: HashMap<String, usize>,
    config: ValidationConfig,
}

impl ModelSchema {
    pub fn builder(name: impl Into<String>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            config: ValidationConfig::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptors in definition order
    pub fn fields(&self) -> &[Arc<FieldDescriptor>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    /// Position of a field in definition order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

/// Builder for [`ModelSchema`]
pub struct ModelSchemaBuilder {
    name: String,
    fields: Vec<FieldDef>,
    config: ValidationConfig,
}

impl ModelSchemaBuilder {
    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Resolve field definitions into an immutable schema
    pub fn build(self) -> SchemaResult<Arc<ModelSchema>> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName {
                model: self.name,
                kind: "model",
            });
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        let mut index = HashMap::with_capacity(self.fields.len());

        for def in self.fields {
            if def.name.trim().is_empty() {
                return Err(SchemaError::EmptyName {
                    model: self.name,
                    kind: "field",
                });
            }
            if index.contains_key(&def.name) {
                return Err(SchemaError::DuplicateField {
                    model: self.name,
                    field: def.name,
                });
            }

            let descriptor = resolve_field(&self.name, def, &self.config)?;
            tracing::trace!(
                "Field '{}.{}' rules: {}",
                self.name,
                descriptor.name,
                descriptor.rules.describe()
            );
            index.insert(descriptor.name.clone(), fields.len());
            fields.push(Arc::new(descriptor));
        }

        tracing::debug!("Registered model schema '{}' with {} field(s)", self.name, fields.len());

        Ok(Arc::new(ModelSchema {
            name: self.name,
            fields,
            index,
            config: self.config,
        }))
    }
}

fn resolve_field(model: &str, def: FieldDef, config: &ValidationConfig) -> SchemaResult<FieldDescriptor> {
    let mut rules = def.rules;
    for extension in &def.extensions {
        rules.extend(extension.rules());
    }
    check_rule_names(model, &def.name, &rules)?;

    let mut descriptor = FieldDescriptor {
        model: model.to_string(),
        name: def.name,
        default: FieldValue::null(),
        rules,
        extensions: def.extensions,
        config: config.clone(),
    };
    descriptor.default = descriptor.hydrate(def.default);

    Ok(descriptor)
}

fn check_rule_names(model: &str, field: &str, rules: &Rules) -> SchemaResult<()> {
    let mut seen = HashSet::new();

    for rule in rules.names() {
        if rule.trim().is_empty() {
            return Err(SchemaError::EmptyName {
                model: model.to_string(),
                kind: "rule",
            });
        }
        // Digit-only keys are the slots nested association reports are folded into
        if rule.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SchemaError::ReservedRuleName {
                model: model.to_string(),
                field: field.to_string(),
                rule: rule.to_string(),
            });
        }
        if !seen.insert(rule) {
            return Err(SchemaError::DuplicateRule {
                model: model.to_string(),
                field: field.to_string(),
                rule: rule.to_string(),
            });
        }
    }

    Ok(())
}
