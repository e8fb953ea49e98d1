//! The users and posts records, and their mapping to table rows.

use crate::errdata;
use crate::error::Result;
use crate::sql::{Insert, NullInt, NullString, Row, Value};

use serde::{Deserialize, Serialize};

/// A record stored as a table row. Rows are mapped onto records by column
/// name: unknown columns are ignored and missing columns are left NULL.
pub trait Record: Default + Sized {
    /// The table name.
    const TABLE: &'static str;
    /// The columns written on insert. Auto-assigned ids are not included.
    const INSERT_COLUMNS: &'static [&'static str];

    /// Returns the values for INSERT_COLUMNS, in order.
    fn insert_values(&self) -> Vec<Value>;

    /// Sets a field from a column value. Unknown columns are ignored.
    fn set_column(&mut self, column: &str, value: Value) -> Result<()>;

    /// Builds a record from a row with the given column names.
    fn from_row(columns: &[String], row: Row) -> Result<Self> {
        if columns.len() != row.len() {
            return errdata!("row has {} values for {} columns", row.len(), columns.len());
        }
        let mut record = Self::default();
        for (column, value) in columns.iter().zip(row) {
            record.set_column(column, value)?;
        }
        Ok(record)
    }

    /// Builds an INSERT statement for the record.
    fn insert(&self) -> Insert {
        Insert::into(Self::TABLE)
            .columns(Self::INSERT_COLUMNS.iter().copied())
            .values(self.insert_values())
    }
}

/// A person, referenced by posts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: NullInt,
    pub name: NullString,
    pub gender: NullString,
    pub age: NullInt,
}

impl User {
    /// Creates a new user without an id.
    pub fn new(name: &str, gender: &str, age: i64) -> Self {
        Self { id: NullInt::null(), name: name.into(), gender: gender.into(), age: age.into() }
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const INSERT_COLUMNS: &'static [&'static str] = &["name", "gender", "age"];

    fn insert_values(&self) -> Vec<Value> {
        vec![self.name.clone().into(), self.gender.clone().into(), self.age.clone().into()]
    }

    fn set_column(&mut self, column: &str, value: Value) -> Result<()> {
        match column {
            "id" => self.id = value.try_into()?,
            "name" => self.name = value.try_into()?,
            "gender" => self.gender = value.try_into()?,
            "age" => self.age = value.try_into()?,
            _ => {}
        }
        Ok(())
    }
}

/// A post, written by exactly one user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: NullInt,
    pub body: NullString,
    pub user_id: NullInt,
    /// The referenced user, resolved in memory after loading. Not a column.
    pub user: Option<User>,
}

impl Post {
    /// Creates a new post without an id.
    pub fn new(user_id: i64, body: &str) -> Self {
        Self { id: NullInt::null(), body: body.into(), user_id: user_id.into(), user: None }
    }
}

impl Record for Post {
    const TABLE: &'static str = "posts";
    const INSERT_COLUMNS: &'static [&'static str] = &["user_id", "body"];

    fn insert_values(&self) -> Vec<Value> {
        vec![self.user_id.clone().into(), self.body.clone().into()]
    }

    fn set_column(&mut self, column: &str, value: Value) -> Result<()> {
        match column {
            "id" => self.id = value.try_into()?,
            "body" => self.body = value.try_into()?,
            "user_id" => self.user_id = value.try_into()?,
            _ => {}
        }
        Ok(())
    }
}

/// The sample users. Ids are assigned by the database, from 1 in this order.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new("Foo", "male", 29),
        User::new("Bar", "female", 17),
        User::new("Baz", "male", 41),
        User::new("Qux", "female", 32),
        User::new("Hoge", "male", 11),
        User::new("Fuga", "female", 51),
    ]
}

/// The sample posts. These assume the sample users got ids 1 and 2.
pub fn sample_posts() -> Vec<Post> {
    vec![Post::new(1, "AAAAAAAAAAA"), Post::new(1, "BBBBBBBBBBBBB"), Post::new(2, "CCCCCC")]
}
