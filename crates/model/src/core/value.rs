use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{cmp::Ordering, fmt};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    GeoPoint { lat: f64, lon: f64 },
    Null,
}

impl Value {
    /// Name of the literal kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::GeoPoint { .. } => "geo_point",
            Value::Null => "null",
        }
    }

    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&(*b as f64)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            (Date(a), Timestamp(b)) => Some(midnight_utc(a).cmp(b)),
            (Timestamp(a), Date(b)) => Some(a.cmp(&midnight_utc(b))),
            _ => None,
        }
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Renders the value as the JSON literal a query document embeds:
    /// dates as ISO-8601 strings, geo-points as lat/lon objects.
    pub fn to_json_literal(&self) -> serde_json::Value {
        match self {
            Value::Int(v) => json!(v),
            Value::Float(v) => json!(v),
            Value::String(v) => json!(v),
            Value::Boolean(v) => json!(v),
            Value::Date(v) => json!(v.format("%Y-%m-%d").to_string()),
            Value::Timestamp(v) => json!(v.to_rfc3339()),
            Value::GeoPoint { lat, lon } => json!({ "lat": lat, "lon": lon }),
            Value::Null => serde_json::Value::Null,
        }
    }
}

fn midnight_utc(date: &NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Value::GeoPoint { lat, lon } => write!(f, "({lat}, {lon})"),
            Value::Null => write!(f, "null"),
        }
    }
}
