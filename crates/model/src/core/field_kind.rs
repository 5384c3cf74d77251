use crate::core::value::Value;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// The declared kind of a field, as resolved from the backend mapping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Keyword,
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    GeoPoint,
}

lazy_static! {
    static ref MAPPING_TYPE_MAP: HashMap<&'static str, FieldKind> = build_mapping_type_map();
}

impl FieldKind {
    pub fn from_mapping_type(type_name: &str) -> Result<Self, String> {
        let normalized = Self::normalize_type_name(type_name);
        MAPPING_TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown mapping type: {type_name}"))
    }

    /// Canonical backend mapping name for the kind.
    pub fn mapping_name(&self) -> &'static str {
        match self {
            FieldKind::Keyword => "keyword",
            FieldKind::Text => "text",
            FieldKind::Integer => "long",
            FieldKind::Float => "double",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::GeoPoint => "geo_point",
        }
    }

    /// Whether a literal of this value kind may be compared against a
    /// field of this kind. Dates never accept bare numbers; an explicit
    /// date literal is required.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Keyword | FieldKind::Text, Value::String(_)) => true,
            (FieldKind::Integer, Value::Int(_)) => true,
            (FieldKind::Float, Value::Int(_) | Value::Float(_)) => true,
            (FieldKind::Boolean, Value::Boolean(_)) => true,
            (FieldKind::Date, Value::Date(_) | Value::Timestamp(_)) => true,
            (FieldKind::GeoPoint, Value::GeoPoint { .. }) => true,
            _ => false,
        }
    }

    /// Kinds with a defined range-comparison translation.
    pub fn supports_range(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Float | FieldKind::Date)
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_lowercase()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mapping_name())
    }
}

fn build_mapping_type_map() -> HashMap<&'static str, FieldKind> {
    use FieldKind::*;

    let entries = [
        ("keyword", Keyword),
        ("text", Text),
        ("byte", Integer),
        ("short", Integer),
        ("integer", Integer),
        ("long", Integer),
        ("half_float", Float),
        ("float", Float),
        ("double", Float),
        ("boolean", Boolean),
        ("date", Date),
        ("geo_point", GeoPoint),
    ];

    let mut map = HashMap::new();
    for (name, kind) in entries {
        map.insert(name, kind);
    }
    map
}
