use super::Value;

use itertools::Itertools as _;

/// A SQL statement that can be rendered as SQL text with positional `?`
/// placeholders and the parameters bound to them, in order.
pub trait Statement {
    /// Appends the statement's SQL to the buffer and its parameters to params.
    fn write(&self, sql: &mut String, params: &mut Vec<Value>);

    /// Renders the statement.
    fn build(&self) -> (String, Vec<Value>) {
        let mut sql = String::new();
        let mut params = Vec::new();
        self.write(&mut sql, &mut params);
        (sql, params)
    }
}

/// A predicate expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// A column reference.
    Column(String),
    /// A constant, bound as a parameter.
    Constant(Value),

    And(Box<Expression>, Box<Expression>),
    Equal(Box<Expression>, Box<Expression>),
    GreaterThan(Box<Expression>, Box<Expression>),
    LessThan(Box<Expression>, Box<Expression>),
    /// Membership in a list of constants. An empty list matches nothing.
    In(Box<Expression>, Vec<Value>),
}

/// Creates a column reference expression.
pub fn column(name: impl Into<String>) -> Expression {
    Expression::Column(name.into())
}

impl Expression {
    /// lhs AND rhs
    pub fn and(self, rhs: Expression) -> Self {
        Self::And(self.into(), rhs.into())
    }

    /// lhs = value
    pub fn equal(self, value: impl Into<Value>) -> Self {
        Self::Equal(self.into(), Self::Constant(value.into()).into())
    }

    /// lhs > value
    pub fn gt(self, value: impl Into<Value>) -> Self {
        Self::GreaterThan(self.into(), Self::Constant(value.into()).into())
    }

    /// lhs < value
    pub fn lt(self, value: impl Into<Value>) -> Self {
        Self::LessThan(self.into(), Self::Constant(value.into()).into())
    }

    /// lhs IN (values...)
    pub fn in_list<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Self {
        Self::In(self.into(), values.into_iter().map(Into::into).collect())
    }

    fn write(&self, sql: &mut String, params: &mut Vec<Value>) {
        match self {
            Self::Column(name) => sql.push_str(name),
            Self::Constant(value) => {
                sql.push('?');
                params.push(value.clone());
            }
            Self::And(lhs, rhs) => {
                sql.push('(');
                lhs.write(sql, params);
                sql.push_str(" AND ");
                rhs.write(sql, params);
                sql.push(')');
            }
            Self::Equal(lhs, rhs) => Self::write_binary(lhs, " = ", rhs, sql, params),
            Self::GreaterThan(lhs, rhs) => Self::write_binary(lhs, " > ", rhs, sql, params),
            Self::LessThan(lhs, rhs) => Self::write_binary(lhs, " < ", rhs, sql, params),
            // IN () is a syntax error, so render an always-false predicate.
            Self::In(_, values) if values.is_empty() => sql.push_str("1 = 0"),
            Self::In(lhs, values) => {
                lhs.write(sql, params);
                sql.push_str(" IN (");
                sql.push_str(&values.iter().map(|_| "?").join(", "));
                sql.push(')');
                params.extend(values.iter().cloned());
            }
        }
    }

    fn write_binary(lhs: &Self, op: &str, rhs: &Self, sql: &mut String, params: &mut Vec<Value>) {
        lhs.write(sql, params);
        sql.push_str(op);
        rhs.write(sql, params);
    }
}

/// A query that can be used as a row source.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    Select(Select),
    Union(Union),
}

impl Statement for Query {
    fn write(&self, sql: &mut String, params: &mut Vec<Value>) {
        match self {
            Self::Select(select) => select.write(sql, params),
            Self::Union(union) => union.write(sql, params),
        }
    }
}

/// The FROM clause of a SELECT.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Table(String),
    /// A derived table. Most dialects require an alias.
    Subquery { query: Box<Query>, alias: String },
}

/// A SELECT statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Select {
    /// The selected columns. Empty means *.
    columns: Vec<String>,
    source: Option<Source>,
    filter: Option<Expression>,
}

impl Select {
    /// Selects all columns (*).
    pub fn all() -> Self {
        Self { columns: Vec::new(), source: None, filter: None }
    }

    /// Selects the given columns.
    pub fn columns<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect(), ..Self::all() }
    }

    /// Selects from a table.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.source = Some(Source::Table(table.into()));
        self
    }

    /// Selects from a derived table with the given alias.
    pub fn from_query(mut self, query: impl Into<Query>, alias: impl Into<String>) -> Self {
        self.source =
            Some(Source::Subquery { query: Box::new(query.into()), alias: alias.into() });
        self
    }

    /// Sets the WHERE predicate, replacing any existing one.
    pub fn filter(mut self, predicate: Expression) -> Self {
        self.filter = Some(predicate);
        self
    }
}

impl Statement for Select {
    fn write(&self, sql: &mut String, params: &mut Vec<Value>) {
        sql.push_str("SELECT ");
        match self.columns.is_empty() {
            true => sql.push('*'),
            false => sql.push_str(&self.columns.join(", ")),
        }
        match &self.source {
            Some(Source::Table(table)) => {
                sql.push_str(" FROM ");
                sql.push_str(table);
            }
            Some(Source::Subquery { query, alias }) => {
                sql.push_str(" FROM (");
                query.write(sql, params);
                sql.push_str(") AS ");
                sql.push_str(alias);
            }
            None => {}
        }
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.write(sql, params);
        }
    }
}

impl From<Select> for Query {
    fn from(select: Select) -> Self {
        Query::Select(select)
    }
}

/// A UNION of SELECTs, with duplicate rows removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Union(Vec<Select>);

impl Union {
    pub fn new(selects: impl IntoIterator<Item = Select>) -> Self {
        Self(selects.into_iter().collect())
    }
}

impl Statement for Union {
    // The operands are not parenthesized, since SQLite rejects that.
    fn write(&self, sql: &mut String, params: &mut Vec<Value>) {
        for (i, select) in self.0.iter().enumerate() {
            if i > 0 {
                sql.push_str(" UNION ");
            }
            select.write(sql, params);
        }
    }
}

impl From<Union> for Query {
    fn from(union: Union) -> Self {
        Query::Union(union)
    }
}

/// An INSERT statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Insert {
    /// Inserts into the given table.
    pub fn into(table: impl Into<String>) -> Self {
        Self { table: table.into(), columns: Vec::new(), rows: Vec::new() }
    }

    /// Sets the column names. Rows must have the same arity.
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a row of values.
    pub fn values(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }
}

impl Statement for Insert {
    fn write(&self, sql: &mut String, params: &mut Vec<Value>) {
        sql.push_str("INSERT INTO ");
        sql.push_str(&self.table);
        if !self.columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&self.columns.join(", "));
            sql.push(')');
        }
        sql.push_str(" VALUES ");
        sql.push_str(
            &self.rows.iter().map(|row| format!("({})", row.iter().map(|_| "?").join(", "))).join(", "),
        );
        params.extend(self.rows.iter().flatten().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn select_filter() {
        let (sql, params) = Select::all()
            .from("users")
            .filter(column("age").gt(20_i64).and(column("gender").equal("male")))
            .build();
        assert_eq!(sql, "SELECT * FROM users WHERE (age > ? AND gender = ?)");
        assert_eq!(params, vec![Value::Integer(20), Value::from("male")]);
    }

    #[test]
    fn select_in() {
        let (sql, params) =
            Select::columns(["id", "name"]).from("users").filter(column("id").in_list([1_i64, 2])).build();
        assert_eq!(sql, "SELECT id, name FROM users WHERE id IN (?, ?)");
        assert_eq!(params, vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn select_in_empty() {
        let (sql, params) =
            Select::all().from("users").filter(column("id").in_list(Vec::<i64>::new())).build();
        assert_eq!(sql, "SELECT * FROM users WHERE 1 = 0");
        assert!(params.is_empty());
    }

    #[test]
    fn select_union_subquery() {
        let union = Union::new([
            Select::all().from("users").filter(column("age").gt(20_i64)),
            Select::all().from("users").filter(column("age").lt(50_i64)),
        ]);
        let (sql, params) = Select::all().from_query(union, "uni").build();
        assert_eq!(
            sql,
            "SELECT * FROM (SELECT * FROM users WHERE age > ? UNION SELECT * FROM users WHERE age < ?) AS uni"
        );
        assert_eq!(params, vec![Value::Integer(20), Value::Integer(50)]);
    }

    #[test]
    fn insert() {
        let (sql, params) = Insert::into("posts")
            .columns(["user_id", "body"])
            .values(vec![Value::Integer(1), "a".into()])
            .values(vec![Value::Integer(2), Value::Null])
            .build();
        assert_eq!(sql, "INSERT INTO posts (user_id, body) VALUES (?, ?), (?, ?)");
        assert_eq!(
            params,
            vec![Value::Integer(1), Value::from("a"), Value::Integer(2), Value::Null]
        );
    }
}
