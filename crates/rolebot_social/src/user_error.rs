//! Errors that carry a message safe to show to users.

use crate::OptionsError;
use rolebot_error::{RolebotError, RolebotErrorKind};

/// Message shown when the failure is not the user's to fix.
pub const GENERIC_USER_MESSAGE: &str = "Something went wrong.";

/// Message shown when the submitted options do not match the command's schema.
pub const OUTDATED_OPTIONS_MESSAGE: &str = "This command's options are out of date.";

/// A command failure with separate user facing and internal explanations.
///
/// Only `user_message` may be sent back to the user. `internal` holds the
/// technical detail and is only logged.
///
/// # Examples
///
/// ```
/// use rolebot_social::UserError;
///
/// let err = UserError::new("That list does not exist.", "role list 9 not found");
/// assert_eq!(err.user_message(), "That list does not exist.");
/// assert_eq!(err.internal(), "role list 9 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{} ({})", user_message, internal)]
pub struct UserError {
    user_message: String,
    internal: String,
}

impl UserError {
    /// Create an error from both explanations.
    pub fn new(user_message: impl Into<String>, internal: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            internal: internal.into(),
        }
    }

    /// An error whose user facing text is also the full explanation.
    pub fn user(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            internal: message.clone(),
            user_message: message,
        }
    }

    /// An internal failure shown to the user as [`GENERIC_USER_MESSAGE`].
    pub fn internal_only(internal: impl Into<String>) -> Self {
        Self::new(GENERIC_USER_MESSAGE, internal)
    }

    /// Text safe to show the user.
    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// Technical explanation for logs.
    pub fn internal(&self) -> &str {
        &self.internal
    }
}

impl From<RolebotError> for UserError {
    fn from(err: RolebotError) -> Self {
        match err.kind() {
            RolebotErrorKind::Validation(validation) => {
                Self::new(format!("{}.", validation.kind()), err.to_string())
            }
            _ => Self::internal_only(err.to_string()),
        }
    }
}

impl From<OptionsError> for UserError {
    fn from(err: OptionsError) -> Self {
        Self::new(OUTDATED_OPTIONS_MESSAGE, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandOption, CommandOptions, OptionsSchema, decode_options};
    use rolebot_error::{DatabaseError, DatabaseErrorKind, ValidationError, ValidationErrorKind};

    #[test]
    fn test_validation_text_reaches_user() {
        let err: RolebotError =
            ValidationError::new(ValidationErrorKind::EmptyField("name".to_string())).into();

        let user_error = UserError::from(err);

        assert_eq!(user_error.user_message(), "Field 'name' cannot be empty.");
        assert!(user_error.internal().contains("Validation Error"));
    }

    #[test]
    fn test_upstream_failure_is_generic() {
        let err: RolebotError =
            DatabaseError::new(DatabaseErrorKind::Connection("refused on 10.0.0.3".to_string()))
                .into();

        let user_error = UserError::from(err);

        assert_eq!(user_error.user_message(), GENERIC_USER_MESSAGE);
        assert!(user_error.internal().contains("10.0.0.3"));
        assert!(!user_error.user_message().contains("10.0.0.3"));
    }

    #[derive(Debug, Default)]
    struct Rename {
        name: String,
    }

    impl CommandOptions for Rename {
        fn schema() -> OptionsSchema<Self> {
            OptionsSchema::<Self>::new().string("name", |o, v| o.name = v)
        }
    }

    #[test]
    fn test_decode_failure_has_specific_safe_message() {
        let err = decode_options::<Rename>(&[
            CommandOption::integer("name", 4),
            CommandOption::string("colour", "red"),
        ])
        .unwrap_err();

        let user_error = UserError::from(err);

        assert_eq!(user_error.user_message(), OUTDATED_OPTIONS_MESSAGE);
        assert!(user_error.internal().contains("colour"));
        assert!(!user_error.user_message().contains("colour"));
    }
}
