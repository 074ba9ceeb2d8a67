//! Handlers for the `role-list` slash command group.

use crate::{
    CommandOptions, CommandRegistry, CommandResponse, CommandResult, OptionsSchema, TypedCommand,
    UserError,
};
use async_trait::async_trait;
use rolebot_cache::ExternalRoleCache;
use rolebot_core::{CreateRoleRequest, NewRoleList, Role};
use rolebot_error::RolebotError;
use rolebot_interface::{RoleListHandle, RoleListRepository};
use std::sync::Arc;
use tracing::{info, instrument};

/// Top-level command name shared by every role list command.
pub const ROLE_LIST_GROUP: &str = "role-list";
/// `role-list create`
pub const ROLE_LIST_CREATE: &str = "create";
/// `role-list list`
pub const ROLE_LIST_LIST: &str = "list";
/// `role-list roles`
pub const ROLE_LIST_ROLES: &str = "roles";
/// `role-list add-role`
pub const ROLE_LIST_ADD_ROLE: &str = "add-role";
/// `role-list create-role`
pub const ROLE_LIST_CREATE_ROLE: &str = "create-role";

/// Combine a group and sub-command into a fully-qualified name.
pub fn sub_command_name(group: &str, command: &str) -> String {
    format!("{} {}", group, command)
}

/// Every `role-list` sub-command, in registration order.
pub const ROLE_LIST_COMMANDS: [&str; 5] = [
    ROLE_LIST_CREATE,
    ROLE_LIST_LIST,
    ROLE_LIST_ROLES,
    ROLE_LIST_ADD_ROLE,
    ROLE_LIST_CREATE_ROLE,
];

/// Fully-qualified names of every role list command.
pub fn role_command_names() -> Vec<String> {
    ROLE_LIST_COMMANDS
        .iter()
        .map(|command| sub_command_name(ROLE_LIST_GROUP, command))
        .collect()
}

/// Register every role list command.
pub fn register_role_commands(
    registry: &mut CommandRegistry,
    lists: Arc<dyn RoleListRepository>,
    cache: ExternalRoleCache,
) {
    registry
        .register_typed(
            sub_command_name(ROLE_LIST_GROUP, ROLE_LIST_CREATE),
            CreateRoleList {
                lists: Arc::clone(&lists),
            },
        )
        .register_typed(
            sub_command_name(ROLE_LIST_GROUP, ROLE_LIST_LIST),
            ListRoleLists {
                lists: Arc::clone(&lists),
            },
        )
        .register_typed(
            sub_command_name(ROLE_LIST_GROUP, ROLE_LIST_ROLES),
            ListRoles {
                lists: Arc::clone(&lists),
            },
        )
        .register_typed(
            sub_command_name(ROLE_LIST_GROUP, ROLE_LIST_ADD_ROLE),
            AddRole {
                lists: Arc::clone(&lists),
                cache: cache.clone(),
            },
        )
        .register_typed(
            sub_command_name(ROLE_LIST_GROUP, ROLE_LIST_CREATE_ROLE),
            CreateRole { lists, cache },
        );
}

/// Options for `role-list create`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateRoleListOptions {
    /// List name
    pub name: String,
    /// Optional blurb
    pub description: String,
}

impl CommandOptions for CreateRoleListOptions {
    fn schema() -> OptionsSchema<Self> {
        OptionsSchema::<Self>::new()
            .string("name", |o, v| o.name = v)
            .string("description", |o, v| o.description = v)
    }
}

/// Options for `role-list roles`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListRolesOptions {
    /// Role list ID
    pub list_id: i64,
}

impl CommandOptions for ListRolesOptions {
    fn schema() -> OptionsSchema<Self> {
        OptionsSchema::<Self>::new()
            .integer("list_id", |o, v| o.list_id = v)
            .bind("list-id")
    }
}

/// Options for `role-list add-role`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddRoleOptions {
    /// Role list ID
    pub list_id: i64,
    /// Chat platform role ID
    pub role_id: String,
    /// Emoji the role is listed under
    pub emoji: String,
}

impl CommandOptions for AddRoleOptions {
    fn schema() -> OptionsSchema<Self> {
        OptionsSchema::<Self>::new()
            .integer("list_id", |o, v| o.list_id = v)
            .bind("list-id")
            .string("role_id", |o, v| o.role_id = v)
            .bind("role-id")
            .string("emoji", |o, v| o.emoji = v)
    }
}

/// Options for `role-list create-role`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CreateRoleOptions {
    /// Role list ID
    pub list_id: i64,
    /// New role's name
    pub name: String,
    /// Emoji the role is listed under
    pub emoji: String,
}

impl CommandOptions for CreateRoleOptions {
    fn schema() -> OptionsSchema<Self> {
        OptionsSchema::<Self>::new()
            .integer("list_id", |o, v| o.list_id = v)
            .bind("list-id")
            .string("name", |o, v| o.name = v)
            .string("emoji", |o, v| o.emoji = v)
    }
}

/// `role-list create`
pub struct CreateRoleList {
    lists: Arc<dyn RoleListRepository>,
}

#[async_trait]
impl TypedCommand for CreateRoleList {
    type Options = CreateRoleListOptions;

    #[instrument(skip(self), fields(command = "role-list create"))]
    async fn run(&self, options: CreateRoleListOptions) -> CommandResult {
        let name = options.name.trim();
        if name.is_empty() {
            return Err(UserError::user("A role list needs a name."));
        }

        let handle = self
            .lists
            .create(&NewRoleList::new(name).with_description(options.description.trim()))
            .await
            .map_err(|e| UserError::new("Failed to create role list.", e.to_string()))?;
        let role_list = handle.role_list();
        info!(role_list_id = role_list.id, "Created role list");

        Ok(Some(
            CommandResponse::new("Role list created")
                .with_description(role_list.name.clone())
                .inline_field("ID", role_list.id.to_string())
                .inline_field("Description", or_placeholder(&role_list.description)),
        ))
    }
}

/// `role-list list`
pub struct ListRoleLists {
    lists: Arc<dyn RoleListRepository>,
}

#[async_trait]
impl TypedCommand for ListRoleLists {
    type Options = ();

    #[instrument(skip(self), fields(command = "role-list list"))]
    async fn run(&self, _options: ()) -> CommandResult {
        let summaries = self.lists.summarize().await?;

        if summaries.is_empty() {
            return Ok(Some(CommandResponse::new("Role Lists").with_description(format!(
                "*No role lists*\nUse /{} to make some.",
                sub_command_name(ROLE_LIST_GROUP, ROLE_LIST_CREATE)
            ))));
        }

        Ok(Some(summaries.iter().fold(
            CommandResponse::new("Role Lists"),
            |response, summary| {
                response.field(
                    format!("#{} {}", summary.role_list.id, summary.role_list.name),
                    format!(
                        "{} ({} {})",
                        or_placeholder(&summary.role_list.description),
                        summary.role_count,
                        if summary.role_count == 1 { "role" } else { "roles" }
                    ),
                )
            },
        )))
    }
}

/// `role-list roles`
pub struct ListRoles {
    lists: Arc<dyn RoleListRepository>,
}

#[async_trait]
impl TypedCommand for ListRoles {
    type Options = ListRolesOptions;

    #[instrument(skip(self), fields(command = "role-list roles"))]
    async fn run(&self, options: ListRolesOptions) -> CommandResult {
        let handle = open_list(self.lists.as_ref(), options.list_id).await?;
        let entries = handle.list_entries().await?;
        let role_list = handle.role_list();

        let response = CommandResponse::new(role_list.name.clone())
            .with_description(if entries.is_empty() {
                "*No roles*".to_string()
            } else {
                or_placeholder(&role_list.description)
            });

        Ok(Some(entries.iter().fold(response, |response, entry| {
            response.inline_field(entry.emoji.clone(), entry.role.name.clone())
        })))
    }
}

/// `role-list add-role`
pub struct AddRole {
    lists: Arc<dyn RoleListRepository>,
    cache: ExternalRoleCache,
}

#[async_trait]
impl TypedCommand for AddRole {
    type Options = AddRoleOptions;

    #[instrument(skip(self), fields(command = "role-list add-role"))]
    async fn run(&self, options: AddRoleOptions) -> CommandResult {
        let emoji = required("emoji", &options.emoji)?;
        let role_id = required("role-id", &options.role_id)?;
        let handle = open_list(self.lists.as_ref(), options.list_id).await?;

        let role = self
            .cache
            .get_by_external_id(role_id)
            .await?
            .ok_or_else(|| UserError::user(format!("Role {} does not exist.", role_id)))?;

        add_to_list(&handle, &role, emoji).await
    }
}

/// `role-list create-role`
pub struct CreateRole {
    lists: Arc<dyn RoleListRepository>,
    cache: ExternalRoleCache,
}

#[async_trait]
impl TypedCommand for CreateRole {
    type Options = CreateRoleOptions;

    #[instrument(skip(self), fields(command = "role-list create-role"))]
    async fn run(&self, options: CreateRoleOptions) -> CommandResult {
        let emoji = required("emoji", &options.emoji)?;
        // Resolve the list and the emoji before creating anything on the platform.
        let handle = open_list(self.lists.as_ref(), options.list_id).await?;
        ensure_emoji_free(&handle, emoji).await?;

        let role = self
            .cache
            .create(&CreateRoleRequest::new(options.name.trim()))
            .await?;
        info!(role_id = role.id, external_id = %role.external_id, "Created role");

        add_to_list(&handle, &role, emoji).await
    }
}

async fn open_list(
    lists: &dyn RoleListRepository,
    list_id: i64,
) -> Result<RoleListHandle, UserError> {
    let not_found = || UserError::user(format!("Role list {} does not exist.", list_id));

    let id = i32::try_from(list_id).map_err(|_| not_found())?;
    lists.get(id).await?.ok_or_else(not_found)
}

async fn ensure_emoji_free(handle: &RoleListHandle, emoji: &str) -> Result<(), UserError> {
    let entries = handle.list_entries().await?;
    if entries.iter().any(|entry| entry.emoji == emoji) {
        return Err(UserError::user(format!(
            "{} is already used in this list.",
            emoji
        )));
    }
    Ok(())
}

async fn add_to_list(handle: &RoleListHandle, role: &Role, emoji: &str) -> CommandResult {
    let member = handle
        .add_member(role, emoji)
        .await
        .map_err(|e| duplicate_emoji(e, emoji))?;
    let role_list = handle.role_list();
    info!(
        role_list_id = role_list.id,
        role_id = member.role.id,
        "Added role to list"
    );

    Ok(Some(
        CommandResponse::new("Role added")
            .with_description(format!("{} {}", member.emoji, member.role.name))
            .inline_field("List", role_list.name.clone())
            .inline_field("Role ID", member.role.external_id),
    ))
}

fn duplicate_emoji(err: RolebotError, emoji: &str) -> UserError {
    if err.is_unique_violation() {
        UserError::new(
            format!("{} is already used in this list.", emoji),
            err.to_string(),
        )
    } else {
        err.into()
    }
}

fn required<'a>(option: &str, value: &'a str) -> Result<&'a str, UserError> {
    let value = value.trim();
    if value.is_empty() {
        Err(UserError::user(format!("The {} option cannot be empty.", option)))
    } else {
        Ok(value)
    }
}

fn or_placeholder(text: &str) -> String {
    if text.is_empty() {
        "*No description*".to_string()
    } else {
        text.to_string()
    }
}
