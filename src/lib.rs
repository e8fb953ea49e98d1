#![warn(clippy::all)]

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod model;
pub mod probe;
pub mod sql;
pub mod stage;

pub use config::Config;
pub use database::Database;
pub use error::{Error, Result};
