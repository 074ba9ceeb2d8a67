//! Discord bot client setup and lifecycle management.

use super::{DiscordError, DiscordErrorKind, DiscordResult, RolebotHandler};
use serenity::Client;
use serenity::gateway::ShardManager;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Discord bot client.
///
/// # Example
/// ```rust,ignore
/// let handler = RolebotHandler::new(router, guild_id);
/// let mut bot = RolebotBot::new(&token, handler).await?;
/// bot.start().await?;
/// ```
pub struct RolebotBot {
    client: Client,
}

impl RolebotBot {
    /// Create a new bot instance.
    ///
    /// # Errors
    /// Returns an error if the Serenity client fails to initialize.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(token: &str, handler: RolebotHandler) -> DiscordResult<Self> {
        info!("Initializing rolebot Discord client");

        let client = Client::builder(token, RolebotHandler::intents())
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client })
    }

    /// Handle for shutting every shard down from another task.
    pub fn shard_manager(&self) -> Arc<ShardManager> {
        Arc::clone(&self.client.shard_manager)
    }

    /// Start the bot. Returns once every shard has shut down.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or encounters a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> DiscordResult<()> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })
    }
}
