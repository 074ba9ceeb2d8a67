//! Discord boundary for the role bot.
//!
//! Available with the `discord` feature.
//!
//! - **role_source**: Discord guild roles as the external source of role IDs
//! - **conversions**: interaction data into router invocations
//! - **commands**: slash command definitions
//! - **handler**: Serenity event handler dispatching through the router
//! - **client**: Serenity client lifecycle

mod client;
mod commands;
mod conversions;
mod error;
mod handler;
mod role_source;

pub use client::RolebotBot;
pub use commands::{command_definitions, role_list_command};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult, external_error};
pub use handler::{RolebotHandler, reply_embed};
pub use role_source::{DiscordRoleSource, MAX_ROLE_NAME_LEN};
