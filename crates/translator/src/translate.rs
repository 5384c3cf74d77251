//! The translation pass: a pure recursive transform from a predicate
//! tree to a query document. No I/O, no shared state; concurrent calls
//! need no coordination.

use crate::{
    ast::predicate::{CompareOp, Predicate, RangeBounds},
    error::Result,
    query::{BoolClause, QueryDocument, RangeClause},
    validate,
};
use model::core::{schema::FieldRef, value::Value};
use tracing::debug;

/// Maps a predicate tree to a query document with the same truth table,
/// or fails with `TypeMismatch`/`UnsupportedOperator` before any
/// request could be issued.
pub fn translate(predicate: &Predicate) -> Result<QueryDocument> {
    debug!("translating predicate tree to query document");
    translate_node(predicate)
}

fn translate_node(predicate: &Predicate) -> Result<QueryDocument> {
    match predicate {
        Predicate::Compare { field, op, value } => translate_compare(field, *op, value),

        Predicate::Range { field, bounds } => translate_range(field, bounds),

        Predicate::In { field, values } => {
            validate::check_comparable(field, "in")?;
            for value in values {
                validate::check_operand(field, value)?;
            }
            Ok(QueryDocument::Terms {
                field: field.name.clone(),
                values: values.iter().map(Value::to_json_literal).collect(),
            })
        }

        Predicate::Exists { field } => Ok(QueryDocument::Exists {
            field: field.name.clone(),
        }),

        Predicate::Missing { field } => Ok(QueryDocument::Bool(BoolClause::must_not(vec![
            QueryDocument::Exists {
                field: field.name.clone(),
            },
        ]))),

        Predicate::Matches { field, .. } => Err(validate::unsupported(field, "matches")),

        Predicate::And(children) => {
            let translated = children.iter().map(translate_node).collect::<Result<_>>()?;
            Ok(QueryDocument::Bool(BoolClause::must(translated)))
        }

        Predicate::Or(children) => {
            let translated = children.iter().map(translate_node).collect::<Result<_>>()?;
            Ok(QueryDocument::Bool(BoolClause::should(translated)))
        }

        Predicate::Not(child) => Ok(QueryDocument::Bool(BoolClause::must_not(vec![
            translate_node(child)?,
        ]))),
    }
}

fn translate_compare(field: &FieldRef, op: CompareOp, value: &Value) -> Result<QueryDocument> {
    validate::check_comparable(field, op.symbol())?;
    validate::check_operand(field, value)?;

    match op {
        CompareOp::Eq => Ok(term(field, value)),
        CompareOp::Ne => Ok(QueryDocument::Bool(BoolClause::must_not(vec![term(
            field, value,
        )]))),
        CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => {
            validate::check_range_capable(field, op.symbol())?;
            let literal = Some(value.to_json_literal());
            let clause = match op {
                CompareOp::Gt => RangeClause {
                    gt: literal,
                    ..RangeClause::default()
                },
                CompareOp::Gte => RangeClause {
                    gte: literal,
                    ..RangeClause::default()
                },
                CompareOp::Lt => RangeClause {
                    lt: literal,
                    ..RangeClause::default()
                },
                _ => RangeClause {
                    lte: literal,
                    ..RangeClause::default()
                },
            };
            Ok(QueryDocument::Range {
                field: field.name.clone(),
                clause,
            })
        }
    }
}

fn translate_range(field: &FieldRef, bounds: &RangeBounds) -> Result<QueryDocument> {
    validate::check_comparable(field, "range")?;
    validate::check_range_capable(field, "range")?;
    if bounds.is_empty() {
        return Err(validate::unsupported(field, "range without bounds"));
    }
    for value in bounds.values() {
        validate::check_operand(field, value)?;
    }

    let literal = |bound: &Option<Value>| bound.as_ref().map(Value::to_json_literal);
    Ok(QueryDocument::Range {
        field: field.name.clone(),
        clause: RangeClause {
            gt: literal(&bounds.gt),
            gte: literal(&bounds.gte),
            lt: literal(&bounds.lt),
            lte: literal(&bounds.lte),
        },
    })
}

fn term(field: &FieldRef, value: &Value) -> QueryDocument {
    QueryDocument::Term {
        field: field.name.clone(),
        value: value.to_json_literal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::Col, error::FilterError};
    use model::core::{field_kind::FieldKind, schema::Schema};
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .with_field("country_name", FieldKind::Keyword)
            .with_field("customer_name", FieldKind::Text)
            .with_field("order_qty", FieldKind::Integer)
            .with_field("discount", FieldKind::Float)
            .with_field("ship_date", FieldKind::Date)
            .with_field("is_priority", FieldKind::Boolean)
            .with_field("store_location", FieldKind::GeoPoint)
    }

    fn col(name: &str) -> Col {
        Col::resolve(&schema(), name).unwrap()
    }

    #[test]
    fn test_translate_eq_to_term_clause() {
        let p = col("country_name")
            .eq(Value::String("Morocco".to_string()))
            .unwrap();
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({ "term": { "country_name": "Morocco" } })
        );
    }

    #[test]
    fn test_translate_and_nests_under_must() {
        let p = col("country_name")
            .eq(Value::String("Morocco".to_string()))
            .unwrap()
            .and(col("order_qty").gt(Value::Int(10)).unwrap());
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({
                "bool": {
                    "must": [
                        { "term": { "country_name": "Morocco" } },
                        { "range": { "order_qty": { "gt": 10 } } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_translate_or_nests_under_should_with_minimum_match() {
        let p = col("country_name")
            .eq(Value::String("Morocco".to_string()))
            .unwrap()
            .or(col("country_name")
                .eq(Value::String("Spain".to_string()))
                .unwrap());
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({
                "bool": {
                    "should": [
                        { "term": { "country_name": "Morocco" } },
                        { "term": { "country_name": "Spain" } }
                    ],
                    "minimum_should_match": 1
                }
            })
        );
    }

    #[test]
    fn test_translate_not_nests_under_must_not() {
        let p = col("is_priority").eq(Value::Boolean(true)).unwrap().negate();
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({ "bool": { "must_not": [ { "term": { "is_priority": true } } ] } })
        );
    }

    #[test]
    fn test_translate_ne_wraps_term_in_must_not() {
        let p = col("order_qty").ne(Value::Int(0)).unwrap();
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({ "bool": { "must_not": [ { "term": { "order_qty": 0 } } ] } })
        );
    }

    #[test]
    fn test_translate_membership_to_terms_clause() {
        let p = col("country_name")
            .is_in(vec![
                Value::String("Morocco".to_string()),
                Value::String("Spain".to_string()),
            ])
            .unwrap();
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({ "terms": { "country_name": ["Morocco", "Spain"] } })
        );
    }

    #[test]
    fn test_translate_between_to_bounded_range() {
        let p = col("discount")
            .between(Value::Float(0.1), Value::Float(0.5))
            .unwrap();
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({ "range": { "discount": { "gte": 0.1, "lte": 0.5 } } })
        );
    }

    #[test]
    fn test_translate_date_bound_as_iso_string() {
        let date = chrono::NaiveDate::from_ymd_opt(2018, 6, 30).unwrap();
        let p = col("ship_date").lt(Value::Date(date)).unwrap();
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({ "range": { "ship_date": { "lt": "2018-06-30" } } })
        );
    }

    #[test]
    fn test_translate_missing_to_negated_exists() {
        let p = col("discount").missing();
        let doc = translate(&p).unwrap();
        assert_eq!(
            doc.to_json(),
            json!({ "bool": { "must_not": [ { "exists": { "field": "discount" } } ] } })
        );
    }

    #[test]
    fn test_hand_built_mismatch_rejected_at_translation() {
        // The tree type is public; translation must not trust it.
        let p = Predicate::Compare {
            field: model::core::schema::FieldRef::new("country_name", FieldKind::Keyword),
            op: CompareOp::Gt,
            value: Value::Int(10),
        };
        let err = translate(&p).unwrap_err();
        assert_eq!(
            err,
            FilterError::TypeMismatch {
                field: "country_name".to_string(),
                expected: FieldKind::Keyword,
                actual: "integer".to_string(),
            }
        );
    }

    #[test]
    fn test_regex_has_no_translation_rule() {
        let p = col("customer_name").matches("^Mor.*");
        let err = translate(&p).unwrap_err();
        assert_eq!(
            err,
            FilterError::UnsupportedOperator {
                field: "customer_name".to_string(),
                operator: "matches".to_string(),
            }
        );
    }

    #[test]
    fn test_error_inside_combinator_propagates() {
        let bad = Predicate::Matches {
            field: model::core::schema::FieldRef::new("customer_name", FieldKind::Text),
            pattern: ".*".to_string(),
        };
        let p = col("order_qty").gt(Value::Int(1)).unwrap().and(bad);
        assert!(matches!(
            translate(&p),
            Err(FilterError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_empty_range_is_unsupported() {
        let p = Predicate::Range {
            field: model::core::schema::FieldRef::new("order_qty", FieldKind::Integer),
            bounds: RangeBounds::default(),
        };
        assert!(matches!(
            translate(&p),
            Err(FilterError::UnsupportedOperator { .. })
        ));
    }
}
