//! In-memory repositories for tests and local experiments.
//!
//! Both enforce the same uniqueness rules as the PostgreSQL tables, so code
//! that relies on `UniqueViolation` behaves identically against either.

use async_trait::async_trait;
use rolebot_core::{NewRole, NewRoleList, Role, RoleList, RoleListMember, RoleListSummary};
use rolebot_error::{DatabaseError, DatabaseErrorKind, RolebotResult};
use rolebot_interface::{RoleListHandle, RoleListInstance, RoleListRepository, RoleRepository};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory role storage keyed by external ID.
///
/// # Example
/// ```
/// use rolebot_core::NewRole;
/// use rolebot_database::InMemoryRoleRepository;
/// use rolebot_interface::RoleRepository;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let repo = InMemoryRoleRepository::new();
/// let role = repo.create(&NewRole::new("42", "Admin")).await.unwrap();
/// assert_eq!(role.id, 1);
/// assert!(repo.create(&NewRole::new("42", "Admin")).await.is_err());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleRepository {
    roles: Arc<RwLock<HashMap<String, Role>>>,
    next_id: Arc<RwLock<i32>>,
}

impl InMemoryRoleRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored roles.
    pub async fn len(&self) -> usize {
        self.roles.read().await.len()
    }

    /// Whether no roles are stored.
    pub async fn is_empty(&self) -> bool {
        self.roles.read().await.is_empty()
    }

    /// Snapshot of every stored role, ordered by local ID.
    pub async fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.roles.read().await.values().cloned().collect();
        roles.sort_by_key(|role| role.id);
        roles
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create(&self, new_role: &NewRole) -> RolebotResult<Role> {
        let mut roles = self.roles.write().await;
        if roles.contains_key(&new_role.external_id) {
            return Err(DatabaseError::new(DatabaseErrorKind::UniqueViolation(
                "roles_external_id_key".to_string(),
            ))
            .into());
        }

        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let role = Role {
            id: *next_id,
            external_id: new_role.external_id.clone(),
            name: new_role.name.clone(),
        };
        roles.insert(role.external_id.clone(), role.clone());
        Ok(role)
    }

    async fn get_by_external_id(&self, external_id: &str) -> RolebotResult<Option<Role>> {
        Ok(self.roles.read().await.get(external_id).cloned())
    }
}

#[derive(Debug, Default)]
struct RoleListState {
    lists: BTreeMap<i32, RoleList>,
    members: HashMap<i32, Vec<RoleListMember>>,
    next_id: i32,
}

/// In-memory role list storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleListRepository {
    state: Arc<RwLock<RoleListState>>,
}

impl InMemoryRoleListRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, role_list: RoleList) -> RoleListHandle {
        Box::new(InMemoryRoleListInstance {
            state: Arc::clone(&self.state),
            role_list,
        })
    }
}

#[async_trait]
impl RoleListRepository for InMemoryRoleListRepository {
    async fn create(&self, new_list: &NewRoleList) -> RolebotResult<RoleListHandle> {
        let role_list = {
            let mut state = self.state.write().await;
            state.next_id += 1;
            let role_list = RoleList {
                id: state.next_id,
                name: new_list.name.clone(),
                description: new_list.description.clone(),
            };
            state.lists.insert(role_list.id, role_list.clone());
            role_list
        };
        Ok(self.handle(role_list))
    }

    async fn get(&self, id: i32) -> RolebotResult<Option<RoleListHandle>> {
        let role_list = self.state.read().await.lists.get(&id).cloned();
        Ok(role_list.map(|role_list| self.handle(role_list)))
    }

    async fn summarize(&self) -> RolebotResult<Vec<RoleListSummary>> {
        let state = self.state.read().await;
        Ok(state
            .lists
            .values()
            .map(|role_list| RoleListSummary {
                role_list: role_list.clone(),
                role_count: state.members.get(&role_list.id).map_or(0, Vec::len) as i64,
            })
            .collect())
    }
}

/// Handle onto one in-memory role list.
pub struct InMemoryRoleListInstance {
    state: Arc<RwLock<RoleListState>>,
    role_list: RoleList,
}

#[async_trait]
impl RoleListInstance for InMemoryRoleListInstance {
    fn role_list(&self) -> &RoleList {
        &self.role_list
    }

    async fn list_entries(&self) -> RolebotResult<Vec<RoleListMember>> {
        Ok(self
            .state
            .read()
            .await
            .members
            .get(&self.role_list.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_member(&self, role: &Role, emoji: &str) -> RolebotResult<RoleListMember> {
        let mut state = self.state.write().await;
        let members = state.members.entry(self.role_list.id).or_default();
        if members.iter().any(|member| member.emoji == emoji) {
            return Err(DatabaseError::new(DatabaseErrorKind::UniqueViolation(
                "role_list_roles_role_list_id_emoji_key".to_string(),
            ))
            .into());
        }

        let member = RoleListMember {
            role: role.clone(),
            emoji: emoji.to_string(),
        };
        members.push(member.clone());
        Ok(member)
    }
}
