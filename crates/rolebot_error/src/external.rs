//! Errors raised by the external source of truth (the chat platform).

/// External source error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExternalErrorKind {
    /// The external API answered with an error
    #[display("External API error: {}", _0)]
    Api(String),
    /// The round trip did not finish in time
    #[display("External call '{}' timed out after {}ms", operation, after_ms)]
    Timeout {
        /// Operation that was in flight
        operation: String,
        /// Elapsed budget in milliseconds
        after_ms: u64,
    },
    /// The external API could not be reached
    #[display("External source unavailable: {}", _0)]
    Unavailable(String),
}

/// External source error with location tracking.
///
/// # Examples
///
/// ```
/// use rolebot_error::{ExternalError, ExternalErrorKind};
///
/// let err = ExternalError::new(ExternalErrorKind::Timeout {
///     operation: "get_role".to_string(),
///     after_ms: 5000,
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("External Error: {} at line {} in {}", kind, line, file)]
pub struct ExternalError {
    /// The kind of error that occurred
    pub kind: ExternalErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExternalError {
    /// Create a new ExternalError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExternalErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Timeouts and unreachable upstreams may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ExternalErrorKind::Timeout { .. } | ExternalErrorKind::Unavailable(_)
        )
    }
}
