//! SQL values and a small statement builder. Statements render to SQL text
//! with positional `?` placeholders, which both MySQL and SQLite accept.

pub mod query;
pub mod value;

pub use query::{column, Expression, Insert, Query, Select, Statement, Union};
pub use value::{NullInt, NullString, Nullable, Value};

/// A row of values.
pub type Row = Vec<Value>;

/// A set of rows along with their column names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rows {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}
