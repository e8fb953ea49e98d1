use crate::config::{DatabaseConfig, Engine};
use crate::error::Result;
use crate::model::Record;
use crate::sql::{Row, Rows, Statement, Value};

use itertools::Itertools as _;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, Column as _, Connection as _, Row as _};

/// The result of a write statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Executed {
    /// The number of rows affected.
    pub rows_affected: u64,
    /// The auto-assigned id of the last inserted row, if the backend reports it.
    pub last_insert_id: Option<i64>,
}

/// A database session: a single connection, used sequentially.
pub struct Database {
    conn: AnyConnection,
    engine: Engine,
}

impl Database {
    /// Connects to the configured database and pings it.
    pub async fn connect(cfg: &DatabaseConfig) -> Result<Self> {
        sqlx::any::install_default_drivers();
        let engine = cfg.engine()?;
        let conn = AnyConnection::connect(&cfg.url()).await?;
        let mut db = Self { conn, engine };
        db.ping().await?;
        // SQLite only enforces REFERENCES constraints when asked to.
        if engine == Engine::Sqlite {
            db.execute_sql("PRAGMA foreign_keys = ON").await?;
        }
        Ok(db)
    }

    /// Returns the database engine.
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Checks that the database is reachable and responsive.
    pub async fn ping(&mut self) -> Result<()> {
        Ok(self.conn.ping().await?)
    }

    /// Executes a plain SQL statement without parameters, e.g. DDL.
    pub async fn execute_sql(&mut self, sql: &str) -> Result<Executed> {
        self.execute_with(sql, Vec::new()).await
    }

    /// Executes a write statement.
    pub async fn execute(&mut self, statement: &impl Statement) -> Result<Executed> {
        let (sql, params) = statement.build();
        self.execute_with(&sql, params).await
    }

    /// Runs a query, returning all rows.
    pub async fn query(&mut self, statement: &impl Statement) -> Result<Rows> {
        let (sql, params) = statement.build();
        log::debug!("Querying {sql} with {}", Self::format_params(&params));
        let rows = Self::bind(sqlx::query(&sql), params).fetch_all(&mut self.conn).await?;
        let columns = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => Vec::new(),
        };
        let rows = rows.iter().map(Self::decode_row).collect::<Result<_>>()?;
        Ok(Rows { columns, rows })
    }

    /// Runs a query and maps the rows onto records.
    pub async fn load<R: Record>(&mut self, statement: &impl Statement) -> Result<Vec<R>> {
        let Rows { columns, rows } = self.query(statement).await?;
        rows.into_iter().map(|row| R::from_row(&columns, row)).collect()
    }

    async fn execute_with(&mut self, sql: &str, params: Vec<Value>) -> Result<Executed> {
        log::debug!("Executing {sql} with {}", Self::format_params(&params));
        let result = Self::bind(sqlx::query(sql), params).execute(&mut self.conn).await?;
        Ok(Executed {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }

    /// Binds parameters to a query, in order.
    fn bind<'q>(
        mut query: Query<'q, Any, AnyArguments<'q>>,
        params: Vec<Value>,
    ) -> Query<'q, Any, AnyArguments<'q>> {
        for param in params {
            query = match param {
                Value::Null => query.bind(None::<i64>),
                Value::Integer(i) => query.bind(i),
                Value::String(s) => query.bind(s),
            };
        }
        query
    }

    /// Decodes a row. Columns are read as integers where possible, falling
    /// back to strings, since the schema only uses those two types.
    fn decode_row(row: &AnyRow) -> Result<Row> {
        (0..row.len())
            .map(|i| {
                if let Ok(value) = row.try_get::<Option<i64>, _>(i) {
                    return Ok(value.map_or(Value::Null, Value::Integer));
                }
                let value = row.try_get::<Option<String>, _>(i)?;
                Ok(value.map_or(Value::Null, Value::String))
            })
            .collect()
    }

    fn format_params(params: &[Value]) -> String {
        format!("[{}]", params.iter().join(", "))
    }
}
