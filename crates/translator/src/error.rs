use model::core::field_kind::FieldKind;
use thiserror::Error;

/// Translation failures are always caller bugs, raised before any
/// request leaves the process. Exactly two kinds exist.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Type mismatch on field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        actual: String,
    },

    #[error("Unsupported operator '{operator}' on field '{field}'")]
    UnsupportedOperator { field: String, operator: String },
}

pub type Result<T> = std::result::Result<T, FilterError>;
