//! The structured query document produced by translation, plus its
//! rendering into the backend's JSON query DSL.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryDocument {
    /// Exact-match clause binding a field to a literal.
    Term { field: String, value: Json },
    /// Set-membership clause.
    Terms { field: String, values: Vec<Json> },
    Range { field: String, clause: RangeClause },
    Exists { field: String },
    Bool(BoolClause),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeClause {
    pub gt: Option<Json>,
    pub gte: Option<Json>,
    pub lt: Option<Json>,
    pub lte: Option<Json>,
}

/// Combining clause. `must` is conjunctive, `should` disjunctive,
/// `must_not` negated. Empty sections are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolClause {
    pub must: Vec<QueryDocument>,
    pub should: Vec<QueryDocument>,
    pub must_not: Vec<QueryDocument>,
    pub minimum_should_match: Option<u32>,
}

impl BoolClause {
    pub fn must(children: Vec<QueryDocument>) -> Self {
        BoolClause {
            must: children,
            ..BoolClause::default()
        }
    }

    pub fn should(children: Vec<QueryDocument>) -> Self {
        // minimum_should_match over zero clauses would still read as
        // unconstrained; leave it out so an empty disjunction renders
        // as a bare bool clause.
        let minimum_should_match = if children.is_empty() { None } else { Some(1) };
        BoolClause {
            should: children,
            minimum_should_match,
            ..BoolClause::default()
        }
    }

    pub fn must_not(children: Vec<QueryDocument>) -> Self {
        BoolClause {
            must_not: children,
            ..BoolClause::default()
        }
    }
}

impl QueryDocument {
    /// Renders the document as the JSON the backend accepts.
    pub fn to_json(&self) -> Json {
        match self {
            QueryDocument::Term { field, value } => {
                wrap("term", wrap(field, value.clone()))
            }
            QueryDocument::Terms { field, values } => {
                wrap("terms", wrap(field, Json::Array(values.clone())))
            }
            QueryDocument::Range { field, clause } => {
                let mut bounds = Map::new();
                for (key, bound) in [
                    ("gt", &clause.gt),
                    ("gte", &clause.gte),
                    ("lt", &clause.lt),
                    ("lte", &clause.lte),
                ] {
                    if let Some(value) = bound {
                        bounds.insert(key.to_string(), value.clone());
                    }
                }
                wrap("range", wrap(field, Json::Object(bounds)))
            }
            QueryDocument::Exists { field } => {
                wrap("exists", wrap("field", Json::String(field.clone())))
            }
            QueryDocument::Bool(clause) => {
                let mut body = Map::new();
                for (key, children) in [
                    ("must", &clause.must),
                    ("should", &clause.should),
                    ("must_not", &clause.must_not),
                ] {
                    if !children.is_empty() {
                        let rendered = children.iter().map(QueryDocument::to_json).collect();
                        body.insert(key.to_string(), Json::Array(rendered));
                    }
                }
                if let Some(min) = clause.minimum_should_match {
                    body.insert("minimum_should_match".to_string(), Json::from(min));
                }
                wrap("bool", Json::Object(body))
            }
        }
    }
}

fn wrap(key: &str, inner: Json) -> Json {
    let mut map = Map::new();
    map.insert(key.to_string(), inner);
    Json::Object(map)
}

impl Serialize for QueryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
