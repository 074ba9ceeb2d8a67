//! Command layer for rolebot.
//!
//! This crate turns slash command invocations into calls on the role cache
//! and role list repository.
//!
//! # Architecture
//!
//! - `options` - decodes option trees into typed records
//! - `router` - maps fully-qualified command names to handlers
//! - `role_commands` - the `role-list` command group
//! - `discord` - Serenity boundary (feature `discord`)
//!
//! Handlers fail with [`UserError`], which keeps the text shown to users
//! apart from the detail that is only logged.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod options;
mod response;
mod role_commands;
mod router;
mod user_error;

#[cfg(feature = "discord")]
pub mod discord;

pub use options::{
    CommandOption, CommandOptions, FieldBinding, FieldSetter, OptionKind, OptionProblem,
    OptionValue, OptionsError, OptionsSchema, decode_options, working_options,
};
pub use response::{
    CommandReply, CommandResponse, CommandResult, ERROR_COLOUR, ResponseField, SUCCESS_COLOUR,
};
pub use role_commands::{
    AddRole, AddRoleOptions, CreateRole, CreateRoleList, CreateRoleListOptions,
    CreateRoleOptions, ListRoleLists, ListRoles, ListRolesOptions, ROLE_LIST_ADD_ROLE,
    ROLE_LIST_COMMANDS, ROLE_LIST_CREATE, ROLE_LIST_CREATE_ROLE, ROLE_LIST_GROUP, ROLE_LIST_LIST,
    ROLE_LIST_ROLES, register_role_commands, role_command_names, sub_command_name,
};
pub use router::{
    CommandHandler, CommandInvocation, CommandRegistry, CommandRouter, TypedCommand,
};
pub use user_error::{GENERIC_USER_MESSAGE, OUTDATED_OPTIONS_MESSAGE, UserError};
