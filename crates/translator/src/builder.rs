//! Construction-time-validated predicate builder. Explicit methods
//! replace the operator-overloading style of the dataframe surface:
//! every comparison checks its operand against the column's declared
//! kind and fails before a malformed tree can exist.

use crate::{
    ast::predicate::{CompareOp, Predicate, RangeBounds},
    error::Result,
    validate,
};
use model::core::{
    schema::{FieldRef, Schema, SchemaError},
    value::Value,
};

/// A column handle bound to a declared field, the entry point for
/// building predicate leaves.
#[derive(Debug, Clone)]
pub struct Col {
    field: FieldRef,
}

impl Col {
    pub fn new(field: FieldRef) -> Self {
        Col { field }
    }

    /// Resolves a field name against the schema, failing on undeclared
    /// columns before any predicate exists.
    pub fn resolve(schema: &Schema, name: &str) -> std::result::Result<Self, SchemaError> {
        schema.field(name).map(Col::new)
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub fn eq(&self, value: Value) -> Result<Predicate> {
        self.compare(CompareOp::Eq, value)
    }

    pub fn ne(&self, value: Value) -> Result<Predicate> {
        self.compare(CompareOp::Ne, value)
    }

    pub fn gt(&self, value: Value) -> Result<Predicate> {
        self.compare(CompareOp::Gt, value)
    }

    pub fn gte(&self, value: Value) -> Result<Predicate> {
        self.compare(CompareOp::Gte, value)
    }

    pub fn lt(&self, value: Value) -> Result<Predicate> {
        self.compare(CompareOp::Lt, value)
    }

    pub fn lte(&self, value: Value) -> Result<Predicate> {
        self.compare(CompareOp::Lte, value)
    }

    /// Inclusive range over both bounds.
    pub fn between(&self, lower: Value, upper: Value) -> Result<Predicate> {
        self.range(RangeBounds {
            gte: Some(lower),
            lte: Some(upper),
            ..RangeBounds::default()
        })
    }

    pub fn range(&self, bounds: RangeBounds) -> Result<Predicate> {
        validate::check_comparable(&self.field, "range")?;
        validate::check_range_capable(&self.field, "range")?;
        for value in bounds.values() {
            validate::check_operand(&self.field, value)?;
        }
        Ok(Predicate::Range {
            field: self.field.clone(),
            bounds,
        })
    }

    pub fn is_in(&self, values: Vec<Value>) -> Result<Predicate> {
        validate::check_comparable(&self.field, "in")?;
        for value in &values {
            validate::check_operand(&self.field, value)?;
        }
        Ok(Predicate::In {
            field: self.field.clone(),
            values,
        })
    }

    pub fn exists(&self) -> Predicate {
        Predicate::Exists {
            field: self.field.clone(),
        }
    }

    pub fn missing(&self) -> Predicate {
        Predicate::Missing {
            field: self.field.clone(),
        }
    }

    /// Regex leaf. Constructible so the vocabulary is complete, but
    /// translation refuses it with `UnsupportedOperator`.
    pub fn matches(&self, pattern: &str) -> Predicate {
        Predicate::Matches {
            field: self.field.clone(),
            pattern: pattern.to_string(),
        }
    }

    fn compare(&self, op: CompareOp, value: Value) -> Result<Predicate> {
        validate::check_comparable(&self.field, op.symbol())?;
        validate::check_operand(&self.field, &value)?;
        if op.is_ordering() {
            validate::check_range_capable(&self.field, op.symbol())?;
        }
        Ok(Predicate::Compare {
            field: self.field.clone(),
            op,
            value,
        })
    }
}
