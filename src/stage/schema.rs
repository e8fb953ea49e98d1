use crate::config::Engine;
use crate::database::Database;
use crate::error::Result;

const MYSQL: &[&str] = &[
    "CREATE TABLE users (
        id INT NOT NULL AUTO_INCREMENT,
        name VARCHAR(255),
        gender VARCHAR(255),
        age INT,
        PRIMARY KEY (id)
    )",
    "CREATE TABLE posts (
        id INT NOT NULL AUTO_INCREMENT,
        user_id INT NOT NULL,
        body VARCHAR(1000),
        PRIMARY KEY (id),
        INDEX idx_user_id (user_id),
        FOREIGN KEY (user_id) REFERENCES users (id)
    )",
];

// SQLite has no inline index definitions.
const SQLITE: &[&str] = &[
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255),
        gender VARCHAR(255),
        age INTEGER
    )",
    "CREATE TABLE posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        body VARCHAR(1000),
        FOREIGN KEY (user_id) REFERENCES users (id)
    )",
    "CREATE INDEX idx_user_id ON posts (user_id)",
];

/// Returns the schema DDL statements for an engine.
pub fn statements(engine: Engine) -> &'static [&'static str] {
    match engine {
        Engine::Mysql => MYSQL,
        Engine::Sqlite => SQLITE,
    }
}

/// Creates the users and posts tables. This is not idempotent: it errors if
/// the tables already exist.
pub async fn create(db: &mut Database) -> Result<()> {
    for statement in statements(db.engine()) {
        db.execute_sql(statement).await?;
    }
    log::info!("Created tables users and posts");
    Ok(())
}
