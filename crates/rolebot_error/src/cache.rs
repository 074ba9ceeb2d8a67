//! Errors specific to the external-backed role cache.

/// Cache error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheErrorKind {
    /// The external source created the entity but the local mirror could not be written
    #[display(
        "External role '{}' ({}) was created but not stored locally: {}",
        external_id,
        name,
        reason
    )]
    Orphaned {
        /// Identifier issued by the external source
        external_id: String,
        /// Name of the orphaned entity
        name: String,
        /// Why the local write failed
        reason: String,
    },
}

/// Cache error with location tracking.
///
/// # Examples
///
/// ```
/// use rolebot_error::{CacheError, CacheErrorKind};
///
/// let err = CacheError::new(CacheErrorKind::Orphaned {
///     external_id: "42".to_string(),
///     name: "Admin".to_string(),
///     reason: "connection reset".to_string(),
/// });
/// assert!(format!("{}", err).contains("'42'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    /// The kind of error that occurred
    pub kind: CacheErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheError {
    /// Create a new CacheError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
