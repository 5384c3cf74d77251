//! In-memory reference evaluation of predicate trees against
//! documents. Used to verify, without a live backend, that translation
//! preserves the predicate's truth table.

use crate::ast::predicate::{CompareOp, Predicate};
use model::{core::value::Value, records::document::Document};
use std::cmp::Ordering;
use tracing::warn;

impl Predicate {
    /// Truth value of the predicate for one document. `None` when the
    /// predicate cannot be evaluated locally (regex leaves). Missing or
    /// null fields fail every comparison except `!=` (which the backend
    /// evaluates as a negated term clause, so absent fields satisfy
    /// it), fail `Exists`, and satisfy `Missing`.
    pub fn evaluate(&self, doc: &Document) -> Option<bool> {
        match self {
            Predicate::Compare { field, op, value } => {
                let actual = doc.get_value(&field.name);
                if actual.is_null() {
                    return Some(matches!(op, CompareOp::Ne));
                }
                Some(match op {
                    CompareOp::Eq => actual.equal(value),
                    CompareOp::Ne => !actual.equal(value),
                    CompareOp::Gt => actual.compare(value) == Some(Ordering::Greater),
                    CompareOp::Gte => matches!(
                        actual.compare(value),
                        Some(Ordering::Greater | Ordering::Equal)
                    ),
                    CompareOp::Lt => actual.compare(value) == Some(Ordering::Less),
                    CompareOp::Lte => matches!(
                        actual.compare(value),
                        Some(Ordering::Less | Ordering::Equal)
                    ),
                })
            }

            Predicate::Range { field, bounds } => {
                let actual = doc.get_value(&field.name);
                if actual.is_null() {
                    return Some(false);
                }
                let within = |bound: &Option<Value>, accept: fn(Ordering) -> bool| {
                    bound.as_ref().is_none_or(|b| {
                        actual.compare(b).map(accept).unwrap_or(false)
                    })
                };
                Some(
                    within(&bounds.gt, Ordering::is_gt)
                        && within(&bounds.gte, Ordering::is_ge)
                        && within(&bounds.lt, Ordering::is_lt)
                        && within(&bounds.lte, Ordering::is_le),
                )
            }

            Predicate::In { field, values } => {
                let actual = doc.get_value(&field.name);
                Some(!actual.is_null() && values.iter().any(|v| actual.equal(v)))
            }

            Predicate::Exists { field } => Some(!doc.get_value(&field.name).is_null()),

            Predicate::Missing { field } => Some(doc.get_value(&field.name).is_null()),

            Predicate::Matches { field, .. } => {
                warn!("regex predicate on '{}' cannot be evaluated locally", field.name);
                None
            }

            Predicate::And(children) => {
                let mut all = true;
                for child in children {
                    all &= child.evaluate(doc)?;
                }
                Some(all)
            }

            Predicate::Or(children) => {
                // An empty disjunction translates to an unconstrained
                // bool clause, which matches every document.
                let mut any = children.is_empty();
                for child in children {
                    any |= child.evaluate(doc)?;
                }
                Some(any)
            }

            Predicate::Not(child) => Some(!child.evaluate(doc)?),
        }
    }
}
