//! The boolean filter expression tree. Leaves compare one column
//! against literals; internal nodes combine children logically.

use model::core::{schema::FieldRef, value::Value};
use serde::{Deserialize, Serialize};

/// An immutable predicate tree over declared columns.
///
/// Trees are built through [`crate::builder::Col`] and the combinators
/// below, both of which validate operand kinds up front. The type stays
/// public, so [`crate::translate`] re-validates before producing a
/// query document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Predicate {
    Compare {
        field: FieldRef,
        op: CompareOp,
        value: Value,
    },
    Range {
        field: FieldRef,
        bounds: RangeBounds,
    },
    In {
        field: FieldRef,
        values: Vec<Value>,
    },
    Exists {
        field: FieldRef,
    },
    Missing {
        field: FieldRef,
    },
    /// Regex match. Part of the filter vocabulary, but the backend
    /// mapping defines no rule for it; translation refuses it rather
    /// than degrading silently.
    Matches {
        field: FieldRef,
        pattern: String,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte
        )
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// Independent optional bounds of a range leaf. `gt`/`lt` are
/// exclusive, `gte`/`lte` inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeBounds {
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
}

impl RangeBounds {
    pub fn is_empty(&self) -> bool {
        self.gt.is_none() && self.gte.is_none() && self.lt.is_none() && self.lte.is_none()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        [&self.gt, &self.gte, &self.lt, &self.lte]
            .into_iter()
            .filter_map(|b| b.as_ref())
    }
}

impl Predicate {
    /// Conjunction. Flattens when the receiver is already an `And`, so
    /// chained composition builds one n-ary clause.
    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::And(mut children) => {
                children.push(other);
                Predicate::And(children)
            }
            p => Predicate::And(vec![p, other]),
        }
    }

    /// Disjunction, flattening like [`Predicate::and`].
    pub fn or(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Or(mut children) => {
                children.push(other);
                Predicate::Or(children)
            }
            p => Predicate::Or(vec![p, other]),
        }
    }

    pub fn negate(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }
}
