//! Slash command definitions registered with Discord.

use crate::{
    ROLE_LIST_ADD_ROLE, ROLE_LIST_CREATE, ROLE_LIST_CREATE_ROLE, ROLE_LIST_GROUP, ROLE_LIST_LIST,
    ROLE_LIST_ROLES,
};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::CommandOptionType;

fn sub_command(name: &str, description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
}

fn list_id_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Integer, "list-id", "ID of the role list")
        .min_int_value(1)
        .required(true)
}

fn emoji_option() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::String,
        "emoji",
        "Emoji users pick to get the role",
    )
    .required(true)
}

/// The `role-list` command and its sub-commands.
pub fn role_list_command() -> CreateCommand {
    CreateCommand::new(ROLE_LIST_GROUP)
        .description("Role list management commands")
        .add_option(
            sub_command(ROLE_LIST_CREATE, "Create a new role list")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "name",
                        "Name of the new role list",
                    )
                    .required(true),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "description",
                    "What the role list is for",
                )),
        )
        .add_option(sub_command(ROLE_LIST_LIST, "Show all the role lists"))
        .add_option(
            sub_command(ROLE_LIST_ROLES, "Show the roles in a role list")
                .add_sub_option(list_id_option()),
        )
        .add_option(
            sub_command(ROLE_LIST_ADD_ROLE, "Add an existing role to a role list")
                .add_sub_option(list_id_option())
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "role-id",
                        "ID of the Discord role",
                    )
                    .required(true),
                )
                .add_sub_option(emoji_option()),
        )
        .add_option(
            sub_command(
                ROLE_LIST_CREATE_ROLE,
                "Create a new role in the server and add it to a role list",
            )
            .add_sub_option(list_id_option())
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "name", "Name of the new role")
                    .required(true),
            )
            .add_sub_option(emoji_option()),
        )
}

/// Every command this bot registers in its guild.
pub fn command_definitions() -> Vec<CreateCommand> {
    vec![role_list_command()]
}
