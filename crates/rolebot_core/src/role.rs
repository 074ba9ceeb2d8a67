//! Role types mirrored from the chat platform.

use serde::{Deserialize, Serialize};

/// A fully resolved role: stored locally and known to the external source.
///
/// `id` is assigned by local storage, `external_id` by the external source.
///
/// # Examples
///
/// ```
/// use rolebot_core::Role;
///
/// let role = Role {
///     id: 1,
///     external_id: "871234".to_string(),
///     name: "Admin".to_string(),
/// };
/// assert_eq!(format!("{}", role), "Admin (871234)");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{} ({})", name, external_id)]
pub struct Role {
    /// Identifier assigned by local storage
    pub id: i32,
    /// Identifier assigned by the external source
    pub external_id: String,
    /// User facing name
    pub name: String,
}

/// A role about to be persisted locally.
///
/// Carries the external identifier the external source already issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    /// Identifier assigned by the external source
    pub external_id: String,
    /// User facing name
    pub name: String,
}

impl NewRole {
    /// Create a new local record request.
    pub fn new(external_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            name: name.into(),
        }
    }
}

impl From<ExternalRole> for NewRole {
    fn from(role: ExternalRole) -> Self {
        Self {
            external_id: role.external_id,
            name: role.name,
        }
    }
}

/// The external source's view of a role. It has no local identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalRole {
    /// Identifier assigned by the external source
    pub external_id: String,
    /// Name as stored by the external source (possibly normalized)
    pub name: String,
}

/// Creation request sent to the external source.
///
/// There is no external identifier field: the source assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExternalRole {
    /// Requested name
    pub name: String,
}

/// Request to create a role through the external-backed cache.
///
/// `external_id` exists so that callers forwarding untrusted input can be
/// rejected explicitly; it must be left unset.
///
/// # Examples
///
/// ```
/// use rolebot_core::CreateRoleRequest;
///
/// let request = CreateRoleRequest::builder()
///     .name("Moderators")
///     .build()
///     .unwrap();
/// assert!(request.external_id().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct CreateRoleRequest {
    /// Requested name
    name: String,
    /// Must be `None`; present only to detect callers that try to choose one
    #[builder(default, setter(strip_option))]
    external_id: Option<String>,
}

impl CreateRoleRequest {
    /// Request a role with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_id: None,
        }
    }

    /// Creates a new request builder.
    pub fn builder() -> CreateRoleRequestBuilder {
        CreateRoleRequestBuilder::default()
    }

    /// The external identifier the caller tried to choose, if any non-empty one.
    pub fn supplied_external_id(&self) -> Option<&str> {
        self.external_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}
