//! rolebot CLI binary.
//!
//! - Run the Discord bot
//! - Apply database migrations
//! - List the slash commands the bot serves

use clap::Parser;
use rolebot::{RolebotConfig, init_logging, role_command_names};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, migrate, run_bot};

    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = RolebotConfig::load(cli.config.as_deref())?;

    let logging = if cli.verbose {
        config.logging().clone().with_level("debug")
    } else {
        config.logging().clone()
    };
    init_logging(&logging)?;

    match cli.command {
        Commands::Run { no_migrate } => {
            run_bot(&config, !no_migrate).await?;
        }

        Commands::Migrate => {
            migrate(&config)?;
        }

        Commands::Commands => {
            for name in role_command_names() {
                println!("/{}", name);
            }
        }
    }

    Ok(())
}
