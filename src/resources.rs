//! Dependent resources
//!
//! A resource row pins its resource type: while any row references a type,
//! the type cannot be soft-deleted.

use crate::db::read;
use crate::error::{Result, StoreError};
use crate::model::Resource;
use crate::tx::transact;

/// Create a resource referencing a resource type by exact name
pub fn create_resource(
    resource_type: &str,
    language: &str,
    version: &str,
    year: u64,
) -> Result<Resource> {
    if language.is_empty() || version.is_empty() {
        return Err(StoreError::Validation(
            "language and version are mandatory".into(),
        ));
    }
    transact(|tx| {
        let type_id = tx.type_id_by_name(resource_type)?.ok_or_else(|| {
            StoreError::NotFound(format!("no resource type named '{}'", resource_type))
        })?;
        let r = Resource {
            resource_id: tx.next_resource_id()?,
            resourcetype_id: type_id,
            language: language.to_string(),
            version: version.to_string(),
            year,
        };
        tx.put_resource(&r)?;
        Ok(r)
    })
}

/// Number of resources referencing a resource type
pub fn resource_count_for_type(type_id: u64) -> Result<usize> {
    read(|d, tx| d.ref_count(tx, type_id))
}
