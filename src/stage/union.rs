use crate::database::Database;
use crate::error::Result;
use crate::model::{Record as _, User};
use crate::sql::{column, Select, Union};

use std::io::Write;

/// Builds the union query: men older than 20, plus women younger than 50.
/// UNION removes duplicate rows.
pub fn query() -> Select {
    let men = Select::all()
        .from(User::TABLE)
        .filter(column("age").gt(20_i64).and(column("gender").equal("male")));
    let women = Select::all()
        .from(User::TABLE)
        .filter(column("age").lt(50_i64).and(column("gender").equal("female")));
    Select::all().from_query(Union::new([men, women]), "uni")
}

/// Runs the union query and writes the users to out.
pub async fn read(db: &mut Database, out: &mut impl Write) -> Result<Vec<User>> {
    let users: Vec<User> = db.load(&query()).await?;
    writeln!(out, "union users = {}", serde_json::to_string_pretty(&users)?)?;
    Ok(users)
}
