//! PostgreSQL implementation of the role list aggregate.

use crate::models::{NewRoleListRoleRow, NewRoleListRow, RoleListRow, RoleRow};
use crate::schema::{role_list_roles, role_lists, roles};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use rolebot_core::{NewRoleList, Role, RoleList, RoleListMember, RoleListSummary};
use rolebot_error::{DatabaseError, RolebotResult};
use rolebot_interface::{RoleListHandle, RoleListInstance, RoleListRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Role list storage backed by the `role_lists` and `role_list_roles` tables.
#[derive(Clone)]
pub struct PgRoleListRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl PgRoleListRepository {
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

    fn handle(&self, role_list: RoleList) -> RoleListHandle {
        Box::new(PgRoleListInstance {
            conn: Arc::clone(&self.conn),
            role_list,
        })
    }
}

#[async_trait]
impl RoleListRepository for PgRoleListRepository {
    #[instrument(skip(self), fields(name = %new_list.name))]
    async fn create(&self, new_list: &NewRoleList) -> RolebotResult<RoleListHandle> {
        let row = {
            let mut conn = self.conn.lock().await;
            diesel::insert_into(role_lists::table)
                .values(NewRoleListRow {
                    name: &new_list.name,
                    description: &new_list.description,
                })
                .returning(RoleListRow::as_returning())
                .get_result(&mut *conn)
                .map_err(DatabaseError::from)?
        };

        debug!(id = row.id, "Created role list");
        Ok(self.handle(row.into()))
    }

    #[instrument(skip(self))]
    async fn get(&self, id: i32) -> RolebotResult<Option<RoleListHandle>> {
        let row = {
            let mut conn = self.conn.lock().await;
            role_lists::table
                .find(id)
                .select(RoleListRow::as_select())
                .first(&mut *conn)
                .optional()
                .map_err(DatabaseError::from)?
        };

        Ok(row.map(|row| self.handle(row.into())))
    }

    #[instrument(skip(self))]
    async fn summarize(&self) -> RolebotResult<Vec<RoleListSummary>> {
        let mut conn = self.conn.lock().await;

        let lists = role_lists::table
            .order(role_lists::id.asc())
            .select(RoleListRow::as_select())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;

        let counts: HashMap<i32, i64> = role_list_roles::table
            .group_by(role_list_roles::role_list_id)
            .select((role_list_roles::role_list_id, count_star()))
            .load::<(i32, i64)>(&mut *conn)
            .map_err(DatabaseError::from)?
            .into_iter()
            .collect();

        Ok(lists
            .into_iter()
            .map(|row| {
                let role_count = counts.get(&row.id).copied().unwrap_or(0);
                RoleListSummary {
                    role_list: row.into(),
                    role_count,
                }
            })
            .collect())
    }
}

/// Handle onto one stored role list.
pub struct PgRoleListInstance {
    conn: Arc<Mutex<PgConnection>>,
    role_list: RoleList,
}

#[async_trait]
impl RoleListInstance for PgRoleListInstance {
    fn role_list(&self) -> &RoleList {
        &self.role_list
    }

    #[instrument(skip(self), fields(role_list_id = self.role_list.id))]
    async fn list_entries(&self) -> RolebotResult<Vec<RoleListMember>> {
        let mut conn = self.conn.lock().await;

        let rows = role_list_roles::table
            .inner_join(roles::table)
            .filter(role_list_roles::role_list_id.eq(self.role_list.id))
            .order(role_list_roles::id.asc())
            .select((RoleRow::as_select(), role_list_roles::emoji))
            .load::<(RoleRow, String)>(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(rows
            .into_iter()
            .map(|(role, emoji)| RoleListMember {
                role: role.into(),
                emoji,
            })
            .collect())
    }

    #[instrument(skip(self, role), fields(role_list_id = self.role_list.id, role_id = role.id))]
    async fn add_member(&self, role: &Role, emoji: &str) -> RolebotResult<RoleListMember> {
        let mut conn = self.conn.lock().await;

        diesel::insert_into(role_list_roles::table)
            .values(NewRoleListRoleRow {
                role_list_id: self.role_list.id,
                role_id: role.id,
                emoji,
            })
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        debug!("Added role to list");
        Ok(RoleListMember {
            role: role.clone(),
            emoji: emoji.to_string(),
        })
    }
}
