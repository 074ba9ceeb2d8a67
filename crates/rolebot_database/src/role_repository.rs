//! PostgreSQL implementation of RoleRepository.

use crate::models::{NewRoleRow, RoleRow};
use crate::schema::roles;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use rolebot_core::{NewRole, Role};
use rolebot_error::{DatabaseError, RolebotResult};
use rolebot_interface::RoleRepository;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Role storage backed by the `roles` table.
///
/// The `roles_external_id_key` constraint rejects a second row for the same
/// external ID; that rejection surfaces as `DatabaseErrorKind::UniqueViolation`.
#[derive(Clone)]
pub struct PgRoleRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl PgRoleRepository {
    /// Create a repository owning its connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a repository from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self), fields(external_id = %new_role.external_id))]
    async fn create(&self, new_role: &NewRole) -> RolebotResult<Role> {
        let mut conn = self.conn.lock().await;

        let row = diesel::insert_into(roles::table)
            .values(NewRoleRow {
                external_id: &new_role.external_id,
                name: &new_role.name,
            })
            .returning(RoleRow::as_returning())
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;

        debug!(id = row.id, "Stored role");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn get_by_external_id(&self, external_id: &str) -> RolebotResult<Option<Role>> {
        let mut conn = self.conn.lock().await;

        let row = roles::table
            .filter(roles::external_id.eq(external_id))
            .select(RoleRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        Ok(row.map(Role::from))
    }
}
