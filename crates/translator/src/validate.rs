//! Operand checks shared by the builder and the translator. Both
//! enforce the same well-typedness invariant: the builder at
//! construction, the translator again because the tree type is public.

use crate::error::{FilterError, Result};
use model::core::{field_kind::FieldKind, schema::FieldRef, value::Value};

/// The operand's literal kind must agree with the column's declared kind.
pub(crate) fn check_operand(field: &FieldRef, value: &Value) -> Result<()> {
    if field.kind.accepts(value) {
        return Ok(());
    }
    Err(FilterError::TypeMismatch {
        field: field.name.clone(),
        expected: field.kind,
        actual: value.kind_name().to_string(),
    })
}

/// Ordered comparisons only have a translation on range-capable kinds.
pub(crate) fn check_range_capable(field: &FieldRef, operator: &str) -> Result<()> {
    if field.kind.supports_range() {
        return Ok(());
    }
    Err(unsupported(field, operator))
}

/// Geo-point columns take part in no comparison this backend mapping
/// defines; reject the leaf before looking at the operand.
pub(crate) fn check_comparable(field: &FieldRef, operator: &str) -> Result<()> {
    if field.kind == FieldKind::GeoPoint {
        return Err(unsupported(field, operator));
    }
    Ok(())
}

pub(crate) fn unsupported(field: &FieldRef, operator: &str) -> FilterError {
    FilterError::UnsupportedOperator {
        field: field.name.clone(),
        operator: operator.to_string(),
    }
}
