//! Role storage and external source traits.

use async_trait::async_trait;
use rolebot_core::{ExternalRole, NewExternalRole, NewRole, Role};
use rolebot_error::RolebotResult;

/// Durable storage of role records.
///
/// Implementations must enforce uniqueness of `external_id`: a second
/// `create` for an already stored external ID fails with
/// `DatabaseErrorKind::UniqueViolation` rather than writing a duplicate row.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Persist a role and return it with its local ID assigned.
    async fn create(&self, new_role: &NewRole) -> RolebotResult<Role>;

    /// Find a stored role by its external ID.
    ///
    /// Returns `Ok(None)` when no record exists.
    async fn get_by_external_id(&self, external_id: &str) -> RolebotResult<Option<Role>>;
}

/// The authoritative external system that issues role identifiers.
#[async_trait]
pub trait ExternalRoleSource: Send + Sync {
    /// Create a role. The source chooses its external ID and may normalize the name.
    async fn create(&self, new_role: &NewExternalRole) -> RolebotResult<ExternalRole>;

    /// Look a role up by external ID.
    ///
    /// Returns `Ok(None)` when the source has no such role.
    async fn get_by_external_id(&self, external_id: &str)
    -> RolebotResult<Option<ExternalRole>>;
}
