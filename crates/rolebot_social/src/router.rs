//! Command routing by fully-qualified name.
//!
//! A fully-qualified name is the command name followed by every selected
//! sub-command group and sub-command, joined with spaces
//! (`"role-list create"`).
//!
//! # Architecture
//!
//! - `CommandHandler` - runs one command against its raw option tree
//! - `TypedCommand` - runs one command against a decoded options record
//! - `CommandRegistry` - name to handler map, built once at startup
//! - `CommandRouter` - resolves invocations and keeps internal errors off the wire

use crate::{
    CommandOption, CommandOptions, CommandReply, CommandResult, OptionValue, UserError,
    decode_options,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// An inbound command: its top-level name and option tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInvocation {
    /// Top-level command name
    pub name: String,
    /// Option tree, possibly holding the selected sub-command
    pub options: Vec<CommandOption>,
}

impl CommandInvocation {
    /// Create an invocation.
    pub fn new(name: impl Into<String>, options: Vec<CommandOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// The command name extended by every selected group and sub-command.
    ///
    /// # Examples
    ///
    /// ```
    /// use rolebot_social::{CommandInvocation, CommandOption};
    ///
    /// let invocation = CommandInvocation::new(
    ///     "role-list",
    ///     vec![CommandOption::sub_command(
    ///         "create",
    ///         vec![CommandOption::string("name", "Colours")],
    ///     )],
    /// );
    /// assert_eq!(invocation.full_name(), "role-list create");
    /// ```
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        let mut options = self.options.as_slice();

        while let Some(node) = options.iter().find(|option| {
            matches!(
                option.value,
                OptionValue::SubCommand(_) | OptionValue::SubCommandGroup(_)
            )
        }) {
            parts.push(node.name.as_str());
            options = node.children().unwrap_or_default();
        }

        parts.join(" ")
    }
}

/// Runs one command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handle the invocation's option tree.
    async fn handle(&self, options: &[CommandOption]) -> CommandResult;
}

/// A command that wants its options decoded into a record first.
#[async_trait]
pub trait TypedCommand: Send + Sync {
    /// Record the option tree is decoded into.
    type Options: CommandOptions + Send;

    /// Run with decoded options.
    async fn run(&self, options: Self::Options) -> CommandResult;
}

/// Adapts a [`TypedCommand`] into a [`CommandHandler`].
struct Decoded<C> {
    command: C,
}

#[async_trait]
impl<C> CommandHandler for Decoded<C>
where
    C: TypedCommand,
{
    async fn handle(&self, options: &[CommandOption]) -> CommandResult {
        let decoded = decode_options::<C::Options>(options).map_err(UserError::from)?;
        self.command.run(decoded).await
    }
}

/// Handlers keyed by fully-qualified command name.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = CommandRegistry::new();
/// registry.register_typed("role-list create", CreateRoleList::new(lists));
/// let router = CommandRouter::new(registry);
/// ```
#[derive(Default)]
pub struct CommandRegistry {
    handlers: BTreeMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        debug!("Creating new CommandRegistry");
        Self::default()
    }

    /// Register a handler under a fully-qualified name, replacing any earlier one.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: CommandHandler + 'static,
    {
        let name = name.into();
        info!(command = %name, "Registering command handler");
        self.handlers.insert(name, Arc::new(handler));
        self
    }

    /// Register a command whose options are decoded before it runs.
    pub fn register_typed<C>(&mut self, name: impl Into<String>, command: C) -> &mut Self
    where
        C: TypedCommand + 'static,
    {
        self.register(name, Decoded { command })
    }

    /// Look up a handler.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.handlers.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Dispatches invocations to registered handlers.
///
/// The registry is frozen once the router is built, so the router can be
/// cloned into every task that receives commands.
#[derive(Clone)]
pub struct CommandRouter {
    registry: Arc<CommandRegistry>,
}

impl CommandRouter {
    /// Freeze a registry into a router.
    pub fn new(registry: CommandRegistry) -> Self {
        info!(commands = registry.len(), "Command router ready");
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The frozen registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run an invocation.
    ///
    /// Unknown commands and handler failures become
    /// [`CommandReply::Failure`] carrying only the user facing message; the
    /// internal explanation is logged here.
    #[instrument(skip(self, invocation), fields(command))]
    pub async fn dispatch(&self, invocation: &CommandInvocation) -> CommandReply {
        let name = invocation.full_name();
        tracing::Span::current().record("command", name.as_str());

        let Some(handler) = self.registry.get(&name) else {
            warn!(
                available = ?self.registry.names(),
                "Received command with no registered handler"
            );
            return CommandReply::Failure {
                message: format!("Unknown command \"{}\".", name),
            };
        };

        debug!("Dispatching command");
        match handler.handle(&invocation.options).await {
            Ok(response) => CommandReply::Success(response),
            Err(e) => {
                error!(
                    user_message = e.user_message(),
                    internal = e.internal(),
                    "Command failed"
                );
                CommandReply::Failure {
                    message: e.user_message().to_string(),
                }
            }
        }
    }
}
