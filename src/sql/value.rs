use crate::errdata;
use crate::error::{Error, Result};

use serde::{Deserialize, Serialize};

/// A primitive SQL value, as bound to statement parameters or read from rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// An unknown value of unknown type.
    Null,
    /// A 64-bit signed integer.
    Integer(i64),
    /// A UTF-8 encoded string.
    String(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(integer) => integer.fmt(f),
            Self::String(string) => write!(f, "'{}'", string.escape_debug()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T: Into<Value>> From<Nullable<T>> for Value {
    fn from(v: Nullable<T>) -> Self {
        v.0.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<Value> for Nullable<i64> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Nullable::null()),
            Value::Integer(i) => Ok(Nullable::new(i)),
            v @ Value::String(_) => errdata!("expected integer, got {v}"),
        }
    }
}

impl TryFrom<Value> for Nullable<String> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Nullable::null()),
            Value::String(s) => Ok(Nullable::new(s)),
            v @ Value::Integer(_) => errdata!("expected string, got {v}"),
        }
    }
}

/// A scalar that may be NULL. Unlike a bare Option, this is the type records
/// use for every column, and it serializes as either the value or null.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nullable<T>(Option<T>);

/// A nullable integer column.
pub type NullInt = Nullable<i64>;

/// A nullable string column.
pub type NullString = Nullable<String>;

impl<T> Nullable<T> {
    /// Creates a valid value.
    pub fn new(value: T) -> Self {
        Self(Some(value))
    }

    /// Creates a NULL value.
    pub fn null() -> Self {
        Self(None)
    }

    /// Returns true if the value is not NULL.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Returns a reference to the value, or None if NULL.
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Consumes the nullable, returning the value or None if NULL.
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T: Copy> Nullable<T> {
    /// Returns a copy of the value, or None if NULL.
    pub fn value(&self) -> Option<T> {
        self.0
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(v: Option<T>) -> Self {
        Self(v)
    }
}

impl From<i64> for Nullable<i64> {
    fn from(v: i64) -> Self {
        Self::new(v)
    }
}

impl From<String> for Nullable<String> {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

impl From<&str> for Nullable<String> {
    fn from(v: &str) -> Self {
        Self::new(v.to_owned())
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("NULL"),
        }
    }
}
