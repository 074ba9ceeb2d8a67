//! Platform neutral command results.

use crate::UserError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Embed colour for successful commands.
pub const SUCCESS_COLOUR: u32 = 0x00FF6A;

/// Embed colour for failed commands.
pub const ERROR_COLOUR: u32 = 0xF44336;

/// A named value shown alongside a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ResponseField {
    name: String,
    value: String,
    inline: bool,
}

/// Payload a handler asks the boundary layer to render.
///
/// # Examples
///
/// ```
/// use rolebot_social::CommandResponse;
///
/// let response = CommandResponse::new("Role list created")
///     .with_description("Pronouns")
///     .field("ID", "3");
/// assert_eq!(response.fields().len(), 1);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
pub struct CommandResponse {
    title: String,
    description: String,
    #[setters(skip)]
    fields: Vec<ResponseField>,
}

impl CommandResponse {
    /// A response with a title and nothing else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a field displayed on its own line.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(ResponseField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }

    /// Append a field displayed beside its neighbours.
    pub fn inline_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(ResponseField {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
        self
    }
}

/// What a handler returns.
pub type CommandResult = Result<Option<CommandResponse>, UserError>;

/// What the router hands back across the boundary.
///
/// Failures only carry the user facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// The command ran; render the payload if there is one
    Success(Option<CommandResponse>),
    /// The command failed
    Failure {
        /// Text safe to show the user
        message: String,
    },
}

impl CommandReply {
    /// Whether the command succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Embed colour for this reply.
    pub fn colour(&self) -> u32 {
        match self {
            Self::Success(_) => SUCCESS_COLOUR,
            Self::Failure { .. } => ERROR_COLOUR,
        }
    }
}
