//! A local interpreter for translated query documents: the stand-in
//! backend that equivalence tests run instead of a live cluster.

use crate::query::{BoolClause, QueryDocument, RangeClause};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use model::{core::value::Value, records::document::Document};
use serde_json::Value as Json;
use std::cmp::Ordering;

/// Whether a document satisfies a translated query document, matching
/// the way the backend evaluates term, terms, range, exists, and bool
/// clauses.
pub fn matches_document(query: &QueryDocument, doc: &Document) -> bool {
    match query {
        QueryDocument::Term { field, value } => {
            let actual = doc.get_value(field);
            !actual.is_null() && json_equal(&actual.to_json_literal(), value)
        }

        QueryDocument::Terms { field, values } => {
            let actual = doc.get_value(field);
            !actual.is_null()
                && values
                    .iter()
                    .any(|v| json_equal(&actual.to_json_literal(), v))
        }

        QueryDocument::Range { field, clause } => {
            let actual = doc.get_value(field);
            if actual.is_null() {
                return false;
            }
            range_matches(&actual, clause)
        }

        QueryDocument::Exists { field } => !doc.get_value(field).is_null(),

        QueryDocument::Bool(clause) => bool_matches(clause, doc),
    }
}

fn bool_matches(clause: &BoolClause, doc: &Document) -> bool {
    if !clause.must.iter().all(|q| matches_document(q, doc)) {
        return false;
    }
    if clause.must_not.iter().any(|q| matches_document(q, doc)) {
        return false;
    }
    if clause.should.is_empty() {
        return true;
    }

    // With no explicit minimum, should-clauses are only required when
    // nothing else constrains the document.
    let required = clause.minimum_should_match.unwrap_or({
        if clause.must.is_empty() && clause.must_not.is_empty() {
            1
        } else {
            0
        }
    }) as usize;
    let satisfied = clause
        .should
        .iter()
        .filter(|q| matches_document(q, doc))
        .count();
    satisfied >= required
}

fn range_matches(actual: &Value, clause: &RangeClause) -> bool {
    let check = |bound: &Option<Json>, accept: fn(Ordering) -> bool| {
        bound
            .as_ref()
            .is_none_or(|b| compare_to_json(actual, b).map(accept).unwrap_or(false))
    };
    check(&clause.gt, Ordering::is_gt)
        && check(&clause.gte, Ordering::is_ge)
        && check(&clause.lt, Ordering::is_lt)
        && check(&clause.lte, Ordering::is_le)
}

/// Orders a stored value against a JSON bound literal: numbers
/// numerically, dates by parsing the ISO-8601 string back.
fn compare_to_json(actual: &Value, bound: &Json) -> Option<Ordering> {
    match (actual, bound) {
        // Integral bounds compare exactly; f64 only covers 53 bits.
        (Value::Int(a), Json::Number(n)) => match n.as_i64() {
            Some(b) => Some(a.cmp(&b)),
            None => (*a as f64).partial_cmp(&n.as_f64()?),
        },
        (Value::Float(a), Json::Number(n)) => a.partial_cmp(&n.as_f64()?),
        (Value::Date(a), Json::String(s)) => {
            Some(midnight_utc(a).cmp(&parse_date_literal(s)?))
        }
        (Value::Timestamp(a), Json::String(s)) => Some(a.cmp(&parse_date_literal(s)?)),
        (Value::String(a), Json::String(s)) => Some(a.as_str().cmp(s.as_str())),
        _ => None,
    }
}

/// Term-clause equality: numbers compare numerically regardless of
/// integer/float representation, everything else structurally.
/// Integer pairs compare exactly rather than through f64.
fn json_equal(a: &Json, b: &Json) -> bool {
    match (a, b) {
        (Json::Number(x), Json::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => x == y,
            },
        },
        _ => a == b,
    }
}

fn parse_date_literal(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(midnight_utc(&date));
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn midnight_utc(date: &NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::Col, translate::translate, Predicate};
    use model::core::{field_kind::FieldKind, schema::Schema, value::Value};

    fn schema() -> Schema {
        Schema::new()
            .with_field("country_name", FieldKind::Keyword)
            .with_field("order_qty", FieldKind::Integer)
            .with_field("discount", FieldKind::Float)
            .with_field("ship_date", FieldKind::Date)
            .with_field("is_priority", FieldKind::Boolean)
    }

    fn col(name: &str) -> Col {
        Col::resolve(&schema(), name).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn orders() -> Vec<Document> {
        let row = |country: &str, qty: i64, discount: Option<f64>, ship: Value, prio: bool| {
            let mut doc = Document::default()
                .with(
                    "country_name",
                    FieldKind::Keyword,
                    Value::String(country.to_string()),
                )
                .with("order_qty", FieldKind::Integer, Value::Int(qty))
                .with("ship_date", FieldKind::Date, ship)
                .with("is_priority", FieldKind::Boolean, Value::Boolean(prio));
            if let Some(d) = discount {
                doc = doc.with("discount", FieldKind::Float, Value::Float(d));
            }
            doc
        };

        vec![
            row("Morocco", 12, Some(0.2), date(2018, 3, 1), true),
            row("Morocco", 4, None, date(2018, 7, 15), false),
            row("Spain", 25, Some(0.05), date(2017, 12, 31), false),
            row("France", 10, Some(0.4), date(2019, 1, 2), true),
            row("Spain", 1, None, date(2018, 6, 30), true),
        ]
    }

    fn corpus() -> Vec<Predicate> {
        vec![
            col("country_name")
                .eq(Value::String("Morocco".to_string()))
                .unwrap(),
            col("order_qty").gt(Value::Int(10)).unwrap(),
            col("country_name")
                .eq(Value::String("Morocco".to_string()))
                .unwrap()
                .and(col("order_qty").gt(Value::Int(10)).unwrap()),
            col("country_name")
                .eq(Value::String("Spain".to_string()))
                .unwrap()
                .or(col("is_priority").eq(Value::Boolean(true)).unwrap()),
            col("order_qty").between(Value::Int(4), Value::Int(12)).unwrap(),
            col("ship_date").lt(date(2018, 7, 1)).unwrap(),
            col("discount").missing(),
            col("discount").exists(),
            col("country_name")
                .is_in(vec![
                    Value::String("Morocco".to_string()),
                    Value::String("France".to_string()),
                ])
                .unwrap(),
            col("order_qty").ne(Value::Int(10)).unwrap(),
            // Absent discount satisfies != the way must_not(term) does.
            col("discount").ne(Value::Float(0.2)).unwrap(),
            col("country_name")
                .eq(Value::String("Spain".to_string()))
                .unwrap()
                .negate(),
            // Empty combinators are constructible directly on the tree
            // and must stay match-all through translation.
            Predicate::And(Vec::new()),
            Predicate::Or(Vec::new()),
            col("ship_date")
                .between(date(2018, 1, 1), date(2018, 12, 31))
                .unwrap()
                .and(col("discount").lte(Value::Float(0.3)).unwrap())
                .and(
                    col("country_name")
                        .eq(Value::String("Morocco".to_string()))
                        .unwrap()
                        .or(col("country_name")
                            .eq(Value::String("Spain".to_string()))
                            .unwrap()),
                ),
        ]
    }

    #[test]
    fn test_translation_preserves_truth_table() {
        for (i, predicate) in corpus().iter().enumerate() {
            let query = translate(predicate).unwrap();
            for (j, doc) in orders().iter().enumerate() {
                assert_eq!(
                    predicate.evaluate(doc),
                    Some(matches_document(&query, doc)),
                    "predicate {i} disagreed with its translation on document {j}"
                );
            }
        }
    }

    #[test]
    fn test_term_clause_ignores_missing_fields() {
        let query = translate(&col("discount").eq(Value::Float(0.2)).unwrap()).unwrap();
        let empty = Document::default();
        assert!(!matches_document(&query, &empty));
    }

    #[test]
    fn test_empty_disjunction_matches_every_document() {
        let p = Predicate::Or(Vec::new());
        let query = translate(&p).unwrap();
        for doc in orders() {
            assert_eq!(p.evaluate(&doc), Some(true));
            assert!(matches_document(&query, &doc));
        }
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        // 2^53 + 1 and 2^53 collapse onto the same f64.
        let stored = Document::default().with(
            "order_qty",
            FieldKind::Integer,
            Value::Int(9_007_199_254_740_993),
        );

        let gt = translate(&col("order_qty").gt(Value::Int(9_007_199_254_740_992)).unwrap())
            .unwrap();
        assert!(matches_document(&gt, &stored));

        let eq = translate(&col("order_qty").eq(Value::Int(9_007_199_254_740_992)).unwrap())
            .unwrap();
        assert!(!matches_document(&eq, &stored));
    }

    #[test]
    fn test_numeric_term_matches_across_representations() {
        let query = translate(&col("discount").eq(Value::Int(1)).unwrap()).unwrap();
        let doc = Document::default().with("discount", FieldKind::Float, Value::Float(1.0));
        assert!(matches_document(&query, &doc));
    }
}
