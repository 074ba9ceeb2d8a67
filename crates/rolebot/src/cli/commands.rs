//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rolebot - self-assignable Discord role lists
#[derive(Parser, Debug)]
#[command(name = "rolebot")]
#[command(about = "Discord bot for self-assignable role lists", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Discord and serve slash commands until Ctrl-C
    Run {
        /// Skip applying pending migrations before starting
        #[arg(long)]
        no_migrate: bool,
    },

    /// Apply pending database migrations
    Migrate,

    /// Print the fully-qualified names of every slash command
    Commands,
}
