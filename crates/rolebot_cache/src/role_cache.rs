//! Cache-aside role lookups.

use crate::RoleCacheConfig;
use rolebot_core::{CreateRoleRequest, ExternalRole, NewExternalRole, NewRole, Role};
use rolebot_error::{
    CacheError, CacheErrorKind, ExternalError, ExternalErrorKind, RolebotResult, ValidationError,
    ValidationErrorKind,
};
use rolebot_interface::{ExternalRoleSource, RoleRepository};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Role lookups served from local storage, populated from the external source on miss.
///
/// The external source is the only party that issues external IDs. Local
/// storage is consulted first; a miss asks the external source and, when it
/// knows the role, persists it so later lookups never leave local storage.
///
/// No locking is done here. Concurrent misses for the same ID may both reach
/// the external source; the repository's uniqueness constraint rejects the
/// second insert and the loser re-reads the winner's row.
///
/// Stored names are never reconciled with later external renames.
#[derive(Clone)]
pub struct ExternalRoleCache {
    repository: Arc<dyn RoleRepository>,
    source: Arc<dyn ExternalRoleSource>,
    config: RoleCacheConfig,
}

impl ExternalRoleCache {
    /// Compose a cache from local storage and the external source.
    pub fn new(
        repository: Arc<dyn RoleRepository>,
        source: Arc<dyn ExternalRoleSource>,
        config: RoleCacheConfig,
    ) -> Self {
        debug!(
            external_timeout_ms = config.external_timeout_ms(),
            "Creating ExternalRoleCache"
        );
        Self {
            repository,
            source,
            config,
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &RoleCacheConfig {
        &self.config
    }

    /// Create a role on the external source, then mirror it locally.
    ///
    /// # Errors
    ///
    /// - Validation error if the request carries an external ID or an empty
    ///   name. Nothing is sent to the external source in that case.
    /// - External error if the source fails or exceeds the configured timeout.
    /// - `CacheErrorKind::Orphaned` if the source created the role but local
    ///   storage rejected it.
    pub async fn create(&self, request: &CreateRoleRequest) -> RolebotResult<Role> {
        self.create_within(request, self.config.external_timeout())
            .await
    }

    /// [`create`](Self::create) with an explicit external round trip budget.
    #[instrument(skip(self, request), fields(name = %request.name()))]
    pub async fn create_within(
        &self,
        request: &CreateRoleRequest,
        budget: Duration,
    ) -> RolebotResult<Role> {
        if let Some(external_id) = request.supplied_external_id() {
            return Err(ValidationError::new(ValidationErrorKind::ExternalIdSupplied(
                external_id.to_string(),
            ))
            .into());
        }
        let name = request.name().trim();
        if name.is_empty() {
            return Err(
                ValidationError::new(ValidationErrorKind::EmptyField("name".to_string())).into(),
            );
        }

        let new_external = NewExternalRole {
            name: name.to_string(),
        };
        let external = bounded("create_role", budget, self.source.create(&new_external)).await?;
        info!(external_id = %external.external_id, "External source created role");

        match self.persist(external.clone()).await {
            Ok(role) => Ok(role),
            Err(e) => {
                error!(
                    external_id = %external.external_id,
                    name = %external.name,
                    error = %e,
                    "Role exists externally but could not be stored locally"
                );
                Err(CacheError::new(CacheErrorKind::Orphaned {
                    external_id: external.external_id,
                    name: external.name,
                    reason: e.to_string(),
                })
                .into())
            }
        }
    }

    /// Look a role up by external ID.
    ///
    /// Returns `Ok(None)` when neither local storage nor the external source
    /// knows the ID.
    pub async fn get_by_external_id(&self, external_id: &str) -> RolebotResult<Option<Role>> {
        self.get_by_external_id_within(external_id, self.config.external_timeout())
            .await
    }

    /// [`get_by_external_id`](Self::get_by_external_id) with an explicit
    /// external round trip budget.
    #[instrument(skip(self))]
    pub async fn get_by_external_id_within(
        &self,
        external_id: &str,
        budget: Duration,
    ) -> RolebotResult<Option<Role>> {
        if let Some(role) = self.repository.get_by_external_id(external_id).await? {
            debug!(id = role.id, "Cache hit");
            return Ok(Some(role));
        }

        debug!("Cache miss, asking external source");
        let external = bounded(
            "get_role",
            budget,
            self.source.get_by_external_id(external_id),
        )
        .await?;

        match external {
            Some(external) => self.persist(external).await.map(Some),
            None => {
                debug!("Role unknown to external source");
                Ok(None)
            }
        }
    }

    /// Store an externally issued role, tolerating a concurrent insert of the same ID.
    async fn persist(&self, external: ExternalRole) -> RolebotResult<Role> {
        let new_role = NewRole::from(external);
        match self.repository.create(&new_role).await {
            Ok(role) => {
                info!(id = role.id, external_id = %role.external_id, "Stored role locally");
                Ok(role)
            }
            Err(e) if e.is_unique_violation() => {
                warn!(
                    external_id = %new_role.external_id,
                    "Role stored concurrently, re-reading"
                );
                self.repository
                    .get_by_external_id(&new_role.external_id)
                    .await?
                    .ok_or(e)
            }
            Err(e) => Err(e),
        }
    }
}

/// Run an external call under a time budget.
async fn bounded<T, F>(operation: &str, budget: Duration, call: F) -> RolebotResult<T>
where
    F: Future<Output = RolebotResult<T>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => {
            error!(operation, after_ms = budget.as_millis() as u64, "External call timed out");
            Err(ExternalError::new(ExternalErrorKind::Timeout {
                operation: operation.to_string(),
                after_ms: budget.as_millis() as u64,
            })
            .into())
        }
    }
}
