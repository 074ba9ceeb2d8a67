//! Discord-specific error types.
//!
//! These cover the bot process itself (connecting, registering commands,
//! replying). Failures of the role API are reported as `ExternalError` so the
//! cache can treat Discord like any other external source.

use derive_getters::Getters;
use rolebot_error::{ExternalError, ExternalErrorKind};

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Connection to Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Slash command registration failed.
    #[display("Command registration failed: {_0}")]
    CommandRegistrationFailed(String),

    /// Interaction reply failed.
    #[display("Interaction failed: {_0}")]
    InteractionFailed(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use rolebot_social::discord::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::InteractionFailed("Unknown interaction".to_string()));
    /// assert!(err.to_string().contains("Unknown interaction"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

/// Classify a Serenity failure from the role API.
///
/// Discord answering with an error is an API error; anything that kept the
/// request from completing is reported as unavailability.
#[track_caller]
pub fn external_error(err: serenity::Error) -> ExternalError {
    let kind = match &err {
        serenity::Error::Http(_) | serenity::Error::Model(_) => {
            ExternalErrorKind::Api(err.to_string())
        }
        _ => ExternalErrorKind::Unavailable(err.to_string()),
    };
    ExternalError::new(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_survives_wrapping() {
        // derive_getters emits `fn file(&'static self)` for `&'static str` fields.
        let err: &'static DiscordError = Box::leak(Box::new(DiscordError::new(
            DiscordErrorKind::CommandRegistrationFailed("Missing Access".to_string()),
        )));

        assert_eq!(
            *err.kind(),
            DiscordErrorKind::CommandRegistrationFailed("Missing Access".to_string())
        );
        assert!(err
            .to_string()
            .starts_with("Discord Error: Command registration failed: Missing Access"));
        assert!(err.file().ends_with("error.rs"));
    }
}
