//! Diesel row types and their conversions into core types.

use crate::schema::{role_list_roles, role_lists, roles};
use diesel::prelude::*;
use rolebot_core::{Role, RoleList};

/// Database row for the roles table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    pub id: i32,
    pub external_id: String,
    pub name: String,
}

/// Insertable struct for the roles table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roles)]
pub struct NewRoleRow<'a> {
    pub external_id: &'a str,
    pub name: &'a str,
}

/// Database row for the role_lists table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = role_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleListRow {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Insertable struct for the role_lists table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = role_lists)]
pub struct NewRoleListRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Insertable struct for the role_list_roles join table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = role_list_roles)]
pub struct NewRoleListRoleRow<'a> {
    pub role_list_id: i32,
    pub role_id: i32,
    pub emoji: &'a str,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            name: row.name,
        }
    }
}

impl From<RoleListRow> for RoleList {
    fn from(row: RoleListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}
