pub mod field_kind;
pub mod schema;
pub mod value;
