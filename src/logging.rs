//! Logging via simplelog. Only seedjoin's own messages are logged, unless the
//! level is debug or trace, in which case sqlx's query logs are included too.
//! Since sqlx may log from its own worker threads, stdout must not be held
//! locked while database calls are in flight.

use crate::error::Result;

use simplelog::LevelFilter;

/// Returns the level filter and logger config for the given log level name.
pub fn config(level: &str) -> Result<(LevelFilter, simplelog::Config)> {
    let level = level.parse::<LevelFilter>()?;
    let mut config = simplelog::ConfigBuilder::new();
    if level != LevelFilter::Debug && level != LevelFilter::Trace {
        config.add_filter_allow_str("seedjoin");
    }
    Ok((level, config.build()))
}

/// Installs the global logger.
pub fn init(level: &str) -> Result<()> {
    let (level, config) = config(level)?;
    simplelog::SimpleLogger::init(level, config)?;
    Ok(())
}
