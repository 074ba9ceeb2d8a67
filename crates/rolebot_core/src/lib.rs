//! Core data types for rolebot.
//!
//! This crate provides the entities mirrored between local storage and the
//! chat platform, which is the only party allowed to issue external role IDs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod role;
mod role_list;

pub use role::{
    CreateRoleRequest, CreateRoleRequestBuilder, ExternalRole, NewExternalRole, NewRole, Role,
};
pub use role_list::{NewRoleList, RoleList, RoleListMember, RoleListSummary};
