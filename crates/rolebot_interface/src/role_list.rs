//! Role list aggregate traits.

use async_trait::async_trait;
use rolebot_core::{NewRoleList, Role, RoleList, RoleListMember, RoleListSummary};
use rolebot_error::RolebotResult;

/// Boxed handle returned by [`RoleListRepository`].
pub type RoleListHandle = Box<dyn RoleListInstance>;

/// Stores role lists and opens handles onto them.
#[async_trait]
pub trait RoleListRepository: Send + Sync {
    /// Persist a new role list and return a handle scoped to it.
    async fn create(&self, new_list: &NewRoleList) -> RolebotResult<RoleListHandle>;

    /// Re-open a handle onto an existing role list.
    ///
    /// Returns `Ok(None)` when no list has that ID.
    async fn get(&self, id: i32) -> RolebotResult<Option<RoleListHandle>>;

    /// Every role list with its member count.
    async fn summarize(&self) -> RolebotResult<Vec<RoleListSummary>>;
}

/// A handle closed over one role list's identity.
///
/// Member operations never take a list ID, so a handle cannot touch
/// another list's members.
#[async_trait]
pub trait RoleListInstance: Send + Sync {
    /// The list this handle is scoped to.
    fn role_list(&self) -> &RoleList;

    /// Member roles, in storage-defined order.
    async fn list_members(&self) -> RolebotResult<Vec<Role>> {
        Ok(self
            .list_entries()
            .await?
            .into_iter()
            .map(|member| member.role)
            .collect())
    }

    /// Member roles with the emoji each is listed under.
    async fn list_entries(&self) -> RolebotResult<Vec<RoleListMember>>;

    /// Add a stored role under an emoji that is unique within the list.
    async fn add_member(&self, role: &Role, emoji: &str) -> RolebotResult<RoleListMember>;
}
