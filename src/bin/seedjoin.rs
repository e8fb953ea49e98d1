//! seedjoin waits for a database to become reachable, creates a users and
//! posts schema, seeds it with sample rows, and prints the results of a few
//! queries as JSON. The database is configured via a YAML file (default
//! config/seedjoin.yaml) and SEEDJOIN_* environment variables.

#![warn(clippy::all)]

use clap::Parser as _;
use seedjoin::error::Result;
use seedjoin::{logging, stage, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    Command::parse().run().await
}

/// The seedjoin command.
#[derive(clap::Parser)]
#[command(about = "Seeds and queries a users/posts database.", version, propagate_version = true)]
struct Command {
    /// The configuration file path.
    #[arg(short = 'c', long, default_value = "config/seedjoin.yaml")]
    config: String,
    /// A database URL, overriding the configuration.
    #[arg(short = 'u', long)]
    url: Option<String>,
    /// The log level, overriding the configuration.
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

impl Command {
    /// Runs the command.
    async fn run(self) -> Result<()> {
        let cfg = Config::load(&self.config)?.with_overrides(self.url, self.log_level);
        logging::init(&cfg.log_level)?;
        // Not locked: sqlx logs from its own threads and would block on it.
        stage::run(&cfg, &mut std::io::stdout()).await
    }
}
