//! Error types for rolebot.
//!
//! This crate provides the error taxonomy shared by the role cache, the
//! repositories and the command layer.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Not-found lookups are not errors: repositories return `Ok(None)`.
//!
//! # Examples
//!
//! ```
//! use rolebot_error::{RolebotResult, ValidationError, ValidationErrorKind};
//!
//! fn check_name(name: &str) -> RolebotResult<()> {
//!     if name.is_empty() {
//!         Err(ValidationError::new(ValidationErrorKind::EmptyField("name".to_string())))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_name("").unwrap_err().is_validation());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
mod database;
mod error;
mod external;
mod validation;

pub use cache::{CacheError, CacheErrorKind};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{RolebotError, RolebotErrorKind, RolebotResult};
pub use external::{ExternalError, ExternalErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
