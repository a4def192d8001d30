//! Soft-delete and restore (the deletion ledger)
//!
//! State machine: Active --delete--> Deleted --restore--> Active.
//! No hard-delete path exists; a Deleted entity persists in the ledger
//! until restored. Ledger item ids are monotonically increasing and
//! independent of the entity id space.

use crate::error::{Result, StoreError};
use crate::model::{DeletedItem, ResourceType, ENTITY_RESOURCE_TYPES};
use crate::tx::transact;

/// Soft-delete a resource type, returning its ledger snapshot
///
/// Fails with `NotFound` for an unknown id and with `Conflict` while any
/// dependent resource references the type. Row removal and snapshot
/// insertion happen in one transaction; on failure nothing changes and
/// no ledger entry exists.
pub fn soft_delete_resource_type(id: u64) -> Result<DeletedItem> {
    transact(|tx| {
        let rt = tx.get_type(id)?.ok_or_else(|| {
            StoreError::NotFound(format!("no resource type with identity {}", id))
        })?;
        let refs = tx.ref_count(id)?;
        if refs > 0 {
            return Err(StoreError::Conflict(format!(
                "resource type {} is referenced by {} resource(s)",
                id, refs
            )));
        }
        let item = DeletedItem {
            item_id: tx.next_item_id()?,
            entity_type: ENTITY_RESOURCE_TYPES.to_string(),
            record: rt.clone(),
        };
        tx.remove_type(&rt)?;
        tx.put_deleted(&item)?;
        Ok(item)
    })
}

/// Restore a soft-deleted entity from its ledger snapshot
///
/// The record is re-inserted in Active state with its original id and the
/// ledger entry is consumed, atomically. A failed restore consumes
/// nothing.
pub fn restore_item(item_id: u64) -> Result<ResourceType> {
    transact(|tx| {
        let item = tx.get_deleted(item_id)?.ok_or_else(|| {
            StoreError::NotFound(format!("no deleted item with identity {}", item_id))
        })?;
        if item.entity_type != ENTITY_RESOURCE_TYPES {
            return Err(StoreError::Validation(format!(
                "cannot restore entity type '{}'",
                item.entity_type
            )));
        }
        // Name uniqueness holds among active entities only; an occupied
        // name blocks the restore and keeps the ledger entry intact.
        if tx.type_id_by_name(&item.record.resource_type)?.is_some() {
            return Err(StoreError::Conflict(format!(
                "resource type '{}' already exists",
                item.record.resource_type
            )));
        }
        tx.put_type(&item.record)?;
        tx.remove_deleted(item_id)?;
        Ok(item.record)
    })
}
