//! Field values: plain JSON data or an ordered collection of nested models

use crate::model::Model;
use serde_json::Value;

/// Current value of a field
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Scalar or plain structured data
    Json(Value),
    /// Ordered collection of nested model instances
    Many(Vec<Model>),
}

impl FieldValue {
    pub fn null() -> Self {
        FieldValue::Json(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Json(Value::Null))
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Json(value) => Some(value),
            FieldValue::Many(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    pub fn as_models(&self) -> Option<&[Model]> {
        match self {
            FieldValue::Many(models) => Some(models),
            FieldValue::Json(_) => None,
        }
    }

    pub fn as_models_mut(&mut self) -> Option<&mut Vec<Model>> {
        match self {
            FieldValue::Many(models) => Some(models),
            FieldValue::Json(_) => None,
        }
    }

    /// Length of the value: characters for strings, elements for arrays,
    /// objects and model collections. `None` for anything else.
    pub fn len(&self) -> Option<usize> {
        match self {
            FieldValue::Json(Value::String(s)) => Some(s.chars().count()),
            FieldValue::Json(Value::Array(arr)) => Some(arr.len()),
            FieldValue::Json(Value::Object(obj)) => Some(obj.len()),
            FieldValue::Json(_) => None,
            FieldValue::Many(models) => Some(models.len()),
        }
    }

    /// Whether the value counts as "not provided": null, blank string,
    /// or an empty array, object or collection
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Json(Value::Null) => true,
            FieldValue::Json(Value::String(s)) => s.trim().is_empty(),
            FieldValue::Json(Value::Array(arr)) => arr.is_empty(),
            FieldValue::Json(Value::Object(obj)) => obj.is_empty(),
            FieldValue::Json(_) => false,
            FieldValue::Many(models) => models.is_empty(),
        }
    }

    /// Short type description used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Json(Value::Null) => "null",
            FieldValue::Json(Value::Bool(_)) => "boolean",
            FieldValue::Json(Value::Number(_)) => "number",
            FieldValue::Json(Value::String(_)) => "string",
            FieldValue::Json(Value::Array(_)) => "array",
            FieldValue::Json(Value::Object(_)) => "object",
            FieldValue::Many(_) => "collection",
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::null()
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

impl From<Vec<Model>> for FieldValue {
    fn from(models: Vec<Model>) -> Self {
        FieldValue::Many(models)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Json(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Json(Value::String(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Json(Value::Bool(value))
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Json(Value::from(value))
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_is_unicode_aware() {
        assert_eq!(FieldValue::from("héllo").len(), Some(5));
        assert_eq!(FieldValue::from(json!([1, 2, 3])).len(), Some(3));
        assert_eq!(FieldValue::from(json!({"a": 1})).len(), Some(1));
        assert_eq!(FieldValue::Many(Vec::new()).len(), Some(0));
        assert_eq!(FieldValue::from(42).len(), None);
        assert_eq!(FieldValue::null().len(), None);
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::null().is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::from(json!([])).is_blank());
        assert!(FieldValue::Many(Vec::new()).is_blank());

        // Numbers and booleans are never blank, zero and false included
        assert!(!FieldValue::from(0).is_blank());
        assert!(!FieldValue::from(false).is_blank());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from("test").as_str(), Some("test"));
        assert_eq!(FieldValue::from(2.5).as_f64(), Some(2.5));
        assert!(FieldValue::from(None::<String>).is_null());
        assert_eq!(FieldValue::from(Some("x")).as_str(), Some("x"));
        assert!(FieldValue::from(Vec::<Model>::new()).as_models().is_some());
        assert!(FieldValue::from(json!([])).as_models().is_none());
    }
}
