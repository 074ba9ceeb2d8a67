//! Role list aggregate types.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A named group of roles users can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleList {
    /// Identifier assigned by local storage
    pub id: i32,
    /// Title of the list
    pub name: String,
    /// Short blurb about the purpose of the list
    pub description: String,
}

/// A role list about to be created.
///
/// # Examples
///
/// ```
/// use rolebot_core::NewRoleList;
///
/// let list = NewRoleList::new("Pronouns").with_description("Pick what fits");
/// assert_eq!(list.description, "Pick what fits");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoleList {
    /// Title of the list
    pub name: String,
    /// Short blurb about the purpose of the list
    pub description: String,
}

impl NewRoleList {
    /// A list with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A role's membership in a role list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleListMember {
    /// The member role
    pub role: Role,
    /// Emoji representing the role within the list, unique per list
    pub emoji: String,
}

/// A role list together with how many roles it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleListSummary {
    /// The list
    pub role_list: RoleList,
    /// Number of member roles
    pub role_count: i64,
}
