//! Bot run command.

use rolebot::RolebotConfig;

#[cfg(feature = "discord")]
pub async fn run_bot(
    config: &RolebotConfig,
    migrate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use rolebot::discord::{DiscordRoleSource, RolebotBot, RolebotHandler};
    use rolebot::{
        CommandRegistry, CommandRouter, ExternalRoleCache, PgRoleListRepository,
        PgRoleRepository, establish_connection, register_role_commands, run_pending_migrations,
    };
    use serenity::http::Http;
    use serenity::model::id::GuildId;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tracing::{error, info};

    let token = config.discord().require_token()?;
    let guild_id = GuildId::new(config.discord().require_guild_id()?);
    let url = config.database().require_url()?;

    let mut conn = establish_connection(&url)?;
    if migrate {
        run_pending_migrations(&mut conn)?;
    }
    let conn = Arc::new(Mutex::new(conn));

    let roles = Arc::new(PgRoleRepository::from_arc(Arc::clone(&conn)));
    let lists = Arc::new(PgRoleListRepository::from_arc(conn));
    let source = Arc::new(DiscordRoleSource::new(Arc::new(Http::new(token)), guild_id));
    let cache = ExternalRoleCache::new(roles, source, config.cache().clone());

    let mut registry = CommandRegistry::new();
    register_role_commands(&mut registry, lists, cache);
    let router = CommandRouter::new(registry);

    let mut bot = RolebotBot::new(token, RolebotHandler::new(router, guild_id)).await?;

    let shard_manager = bot.shard_manager();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C, shutting down");
                shard_manager.shutdown_all().await;
            }
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    bot.start().await?;
    info!("Bot stopped");
    Ok(())
}

#[cfg(not(feature = "discord"))]
pub async fn run_bot(
    _config: &RolebotConfig,
    _migrate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    Err(rolebot::ConfigError::new("rolebot was built without the `discord` feature").into())
}
