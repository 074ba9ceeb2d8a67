//! Top-level error wrapper types.

use crate::{
    CacheError, ConfigError, DatabaseError, DatabaseErrorKind, ExternalError, ValidationError,
};

/// Every failure the rolebot core can report.
///
/// # Examples
///
/// ```
/// use rolebot_error::{RolebotError, ConfigError};
///
/// let err: RolebotError = ConfigError::new("Missing field").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RolebotErrorKind {
    /// Local storage error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// External source error
    #[from(ExternalError)]
    External(ExternalError),
    /// Caller input rejected
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Local and external state diverged
    #[from(CacheError)]
    Cache(CacheError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Rolebot error with kind discrimination.
///
/// # Examples
///
/// ```
/// use rolebot_error::{RolebotResult, ConfigError};
///
/// fn might_fail() -> RolebotResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rolebot Error: {}", _0)]
pub struct RolebotError(Box<RolebotErrorKind>);

impl RolebotError {
    /// Create a new error from a kind.
    pub fn new(kind: RolebotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RolebotErrorKind {
        &self.0
    }

    /// Whether the caller supplied bad input.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), RolebotErrorKind::Validation(_))
    }

    /// Whether a uniqueness constraint in local storage rejected a write.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self.kind(), RolebotErrorKind::Database(e) if e.is_unique_violation())
    }

    /// Whether the failure is transient. Nothing in the core retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self.kind() {
            RolebotErrorKind::External(e) => e.is_retryable(),
            RolebotErrorKind::Database(e) => matches!(e.kind, DatabaseErrorKind::Connection(_)),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to RolebotErrorKind
impl<T> From<T> for RolebotError
where
    T: Into<RolebotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for rolebot operations.
pub type RolebotResult<T> = std::result::Result<T, RolebotError>;
