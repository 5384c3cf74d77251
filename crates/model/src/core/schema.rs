use crate::core::field_kind::FieldKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown mapping type '{type_name}' for field '{field}'")]
    UnknownMappingType { field: String, type_name: String },
}

/// A resolved column reference: a field name and its declared kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRef {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldRef {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        FieldRef {
            name: name.to_string(),
            kind,
        }
    }
}

/// The declared fields of an index, handed over by the collaborator
/// that owns column-kind inference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    fields: HashMap<String, FieldKind>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, kind: FieldKind) -> Self {
        self.declare(name, kind);
        self
    }

    pub fn declare(&mut self, name: &str, kind: FieldKind) {
        self.fields.insert(name.to_string(), kind);
    }

    /// Builds a schema from backend mapping entries of the form
    /// `(field name, mapping type name)`.
    pub fn from_mapping<'a, I>(entries: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut schema = Schema::new();
        for (field, type_name) in entries {
            let kind = FieldKind::from_mapping_type(type_name).map_err(|_| {
                SchemaError::UnknownMappingType {
                    field: field.to_string(),
                    type_name: type_name.to_string(),
                }
            })?;
            schema.declare(field, kind);
        }
        Ok(schema)
    }

    pub fn field(&self, name: &str) -> Result<FieldRef, SchemaError> {
        self.kind_of(name)
            .map(|kind| FieldRef::new(name, kind))
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
