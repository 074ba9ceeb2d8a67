//! Command-line interface module.

mod commands;
mod migrate;
mod run;

pub use commands::{Cli, Commands};
pub use migrate::migrate;
pub use run::run_bot;
