//! Trait definitions for rolebot storage and the external source of truth.
//!
//! Local storage, the chat platform and the cache all speak the same two
//! operations (create, get by external ID) but with different guarantees:
//! - `RoleRepository` persists records and assigns local IDs
//! - `ExternalRoleSource` is the only party that issues external IDs
//! - `RoleListRepository` creates role lists and hands out scoped `RoleListInstance` handles

mod role;
mod role_list;

pub use role::{ExternalRoleSource, RoleRepository};
pub use role_list::{RoleListHandle, RoleListInstance, RoleListRepository};
