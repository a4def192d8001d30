//! Role-checked operations
//!
//! Callers arrive here already authenticated; these wrappers decide what
//! the actor's role allows. For delete, an unknown id is reported before
//! the permission check so authenticated callers get exact-match 404s.

use crate::error::{Result, StoreError};
use crate::model::{DeletedItem, ResourceType};
use crate::roles::{can_create, can_delete, can_restore, Role};
use crate::{ledger, types};

/// Create a resource type on behalf of an authenticated actor
pub fn create_resource_type(actor: &str, role: Role, name: &str) -> Result<ResourceType> {
    if !can_create(role) {
        return Err(StoreError::Permission(format!(
            "'{}' may not create resource types",
            actor
        )));
    }
    types::create_resource_type(actor, name)
}

/// Soft-delete a resource type; creator or super administrator only
pub fn delete_resource_type(actor: &str, role: Role, id: u64) -> Result<DeletedItem> {
    let rt = types::get_resource_type(id)?.ok_or_else(|| {
        StoreError::NotFound(format!("no resource type with identity {}", id))
    })?;
    if !can_delete(role, rt.created_by == actor) {
        return Err(StoreError::Permission(format!(
            "'{}' may not delete resource type {}",
            actor, id
        )));
    }
    ledger::soft_delete_resource_type(id)
}

/// Restore a deleted item; super administrator only, creators included
/// in the rejection
pub fn restore_deleted_item(actor: &str, role: Role, item_id: u64) -> Result<ResourceType> {
    if !can_restore(role) {
        return Err(StoreError::Permission(format!(
            "'{}' may not restore deleted items",
            actor
        )));
    }
    ledger::restore_item(item_id)
}
