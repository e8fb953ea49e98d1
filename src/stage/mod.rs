//! The demo pipeline. Each stage runs only if the previous one succeeded,
//! and any error aborts the remaining stages without rolling anything back.

pub mod reader;
pub mod schema;
pub mod seed;
pub mod union;

use crate::config::{Config, SeedConfig};
use crate::database::Database;
use crate::error::Result;
use crate::probe::Prober;

use std::io::Write;

/// Waits for the database to become reachable, then runs all stages,
/// writing results to out.
pub async fn run(cfg: &Config, out: &mut impl Write) -> Result<()> {
    log::info!("Connecting to {}", cfg.database.display_url());
    let prober = Prober::new(cfg.probe.interval(), cfg.probe.max_attempts);
    let database = &cfg.database;
    let mut db = prober.wait(|| Database::connect(database)).await?;
    log::info!("Connected to {} database", db.engine());
    run_stages(&mut db, &cfg.seed, out).await
}

/// Runs the schema, seed, reader and union stages against a connected
/// database.
pub async fn run_stages(db: &mut Database, seed: &SeedConfig, out: &mut impl Write) -> Result<()> {
    schema::create(db).await?;
    seed::load(db, seed).await?;
    reader::read(db, out).await?;
    union::read(db, out).await?;
    out.flush()?;
    Ok(())
}
