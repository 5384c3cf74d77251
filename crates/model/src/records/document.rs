use crate::core::{field_kind::FieldKind, value::Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Option<Value>,
    pub kind: FieldKind,
}

/// An in-memory row, used by the reference evaluator and the backend
/// simulator. Real documents live in the search backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub fields: Vec<FieldValue>,
}

impl Document {
    pub fn new(fields: Vec<FieldValue>) -> Self {
        Document { fields }
    }

    pub fn with(mut self, name: &str, kind: FieldKind, value: Value) -> Self {
        self.fields.push(FieldValue {
            name: name.to_string(),
            value: Some(value),
            kind,
        });
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }
}
