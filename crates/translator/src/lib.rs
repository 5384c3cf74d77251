pub mod ast;
pub mod builder;
pub mod error;
pub mod eval;
pub mod matcher;
pub mod query;
pub mod translate;

mod validate;

pub use ast::predicate::{CompareOp, Predicate, RangeBounds};
pub use builder::Col;
pub use error::{FilterError, Result};
pub use matcher::matches_document;
pub use query::{BoolClause, QueryDocument, RangeClause};
pub use translate::translate;
