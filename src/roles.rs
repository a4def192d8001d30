//! Role model and capability checks
//!
//! Authorization is a pure function over an enumerated role set, never an
//! ad-hoc string comparison at a call site.

use crate::error::{Result, StoreError};

/// Enumerated account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Admin,
    Editor,
    Viewer,
    Registered,
}

impl Role {
    /// Stable string form used in the users table
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
            Role::Registered => "registered",
        }
    }

    pub fn parse(s: &str) -> Result<Role> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            "registered" => Ok(Role::Registered),
            _ => Err(StoreError::Storage(format!("unknown role '{}'", s))),
        }
    }
}

/// Any authenticated account may register a resource type
pub fn can_create(_role: Role) -> bool {
    true
}

/// Only the record's creator or the super administrator may soft-delete
pub fn can_delete(role: Role, is_creator: bool) -> bool {
    matches!(role, Role::SuperAdmin) || is_creator
}

/// Only the super administrator may restore deleted items
pub fn can_restore(role: Role) -> bool {
    matches!(role, Role::SuperAdmin)
}
