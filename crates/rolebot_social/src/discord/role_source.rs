//! Discord guild roles as the external source of role IDs.

use super::external_error;
use async_trait::async_trait;
use rolebot_core::{ExternalRole, NewExternalRole};
use rolebot_error::{RolebotResult, ValidationError, ValidationErrorKind};
use rolebot_interface::ExternalRoleSource;
use serenity::builder::EditRole;
use serenity::http::Http;
use serenity::model::id::{GuildId, RoleId};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Longest role name Discord accepts, in characters.
pub const MAX_ROLE_NAME_LEN: usize = 100;

/// Creates and looks up roles in one guild through Discord's HTTP API.
///
/// Discord assigns every role's snowflake, which becomes its external ID.
#[derive(Clone)]
pub struct DiscordRoleSource {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl DiscordRoleSource {
    /// Create a source bound to one guild.
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }

    /// The guild roles are created in.
    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }
}

/// Parse an external ID into a role snowflake; anything else names no role.
fn parse_role_id(external_id: &str) -> Option<RoleId> {
    external_id
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(RoleId::new)
}

#[async_trait]
impl ExternalRoleSource for DiscordRoleSource {
    #[instrument(skip(self, new_role), fields(guild_id = %self.guild_id, name = %new_role.name))]
    async fn create(&self, new_role: &NewExternalRole) -> RolebotResult<ExternalRole> {
        if new_role.name.chars().count() > MAX_ROLE_NAME_LEN {
            return Err(ValidationError::new(ValidationErrorKind::InvalidField {
                field: "name".to_string(),
                reason: format!("must be at most {} characters", MAX_ROLE_NAME_LEN),
            })
            .into());
        }

        let role = self
            .guild_id
            .create_role(&*self.http, EditRole::new().name(&new_role.name))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create Discord role");
                external_error(e)
            })?;

        info!(role_id = %role.id, "Created Discord role");
        Ok(ExternalRole {
            external_id: role.id.to_string(),
            name: role.name,
        })
    }

    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    async fn get_by_external_id(&self, external_id: &str) -> RolebotResult<Option<ExternalRole>> {
        let Some(role_id) = parse_role_id(external_id) else {
            debug!("External ID is not a role snowflake");
            return Ok(None);
        };

        let mut roles = self.guild_id.roles(&*self.http).await.map_err(|e| {
            error!(error = %e, "Failed to fetch Discord roles");
            external_error(e)
        })?;

        Ok(roles.remove(&role_id).map(|role| ExternalRole {
            external_id: role.id.to_string(),
            name: role.name,
        }))
    }
}
