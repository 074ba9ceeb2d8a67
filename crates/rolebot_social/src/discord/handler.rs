//! Serenity event handler for the role bot.

use crate::{CommandInvocation, CommandReply, CommandRouter};
use serenity::all::{CommandInteraction, GuildId, Interaction, Ready};
use serenity::async_trait;
use serenity::builder::{
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use tracing::{debug, error, info};

use super::{DiscordError, DiscordErrorKind, DiscordResult, command_definitions};

/// Event handler for the role bot.
///
/// Registers the slash commands in its guild once connected and answers
/// every command interaction through the router.
pub struct RolebotHandler {
    router: CommandRouter,
    guild_id: GuildId,
}

impl RolebotHandler {
    /// Create a handler serving one guild.
    pub fn new(router: CommandRouter, guild_id: GuildId) -> Self {
        Self { router, guild_id }
    }

    /// Required gateway intents for the bot.
    ///
    /// Slash commands arrive as interactions, which need no privileged intents.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
    }

    /// Replace the guild's slash commands with the role-list group.
    async fn register_commands(&self, ctx: &Context) -> DiscordResult<usize> {
        self.guild_id
            .set_commands(&ctx.http, command_definitions())
            .await
            .map(|commands| commands.len())
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::CommandRegistrationFailed(e.to_string()))
            })
    }

    /// Answer an interaction; failures are only visible to the invoking user.
    async fn reply(
        &self,
        ctx: &Context,
        command: &CommandInteraction,
        reply: &CommandReply,
    ) -> DiscordResult<()> {
        let message = CreateInteractionResponseMessage::new()
            .embed(reply_embed(reply))
            .ephemeral(!reply.is_success());

        command
            .create_response(ctx, CreateInteractionResponse::Message(message))
            .await
            .map_err(|e| DiscordError::new(DiscordErrorKind::InteractionFailed(e.to_string())))
    }
}

/// Render a router reply as an embed.
pub fn reply_embed(reply: &CommandReply) -> CreateEmbed {
    let embed = CreateEmbed::new().colour(reply.colour());

    match reply {
        CommandReply::Success(Some(response)) => {
            let embed = embed.title(response.title());
            let embed = if response.description().is_empty() {
                embed
            } else {
                embed.description(response.description())
            };
            embed.fields(
                response
                    .fields()
                    .iter()
                    .map(|field| (field.name().clone(), field.value().clone(), *field.inline())),
            )
        }
        CommandReply::Success(None) => embed.title("Done"),
        CommandReply::Failure { message } => embed.title("Error").description(message),
    }
}

#[async_trait]
impl EventHandler for RolebotHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guild_id = %self.guild_id,
            "Bot connected to Discord"
        );

        match self.register_commands(&ctx).await {
            Ok(count) => info!(count, "Registered slash commands"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    /// Called for every interaction; only slash commands are handled.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            debug!("Ignoring non-command interaction");
            return;
        };

        let invocation = CommandInvocation::from(&command.data);
        let reply = self.router.dispatch(&invocation).await;

        if let Err(e) = self.reply(&ctx, &command, &reply).await {
            error!(
                command = %invocation.full_name(),
                error = %e,
                "Failed to reply to command interaction"
            );
        }
    }
}
