//! Resource type CRUD (unprotected; role checks live in `protected`)

use crate::db::read;
use crate::error::{err, Result, StoreError};
use crate::model::ResourceType;
use crate::tx::transact;

/// Reject empty names and names with internal whitespace; the value is
/// used as a naming token for dependent tables
pub fn validate_type_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StoreError::Validation("resourceType must not be empty".into()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(StoreError::Validation(
            "resourceType must not contain whitespace".into(),
        ));
    }
    Ok(())
}

/// Create a resource type in Active state with a fresh id
pub fn create_resource_type(created_by: &str, name: &str) -> Result<ResourceType> {
    validate_type_name(name)?;
    transact(|tx| {
        if tx.type_id_by_name(name)?.is_some() {
            return Err(StoreError::Conflict(format!(
                "resource type '{}' already exists",
                name
            )));
        }
        let rt = ResourceType {
            resourcetype_id: tx.next_resourcetype_id()?,
            resource_type: name.to_string(),
            created_by: created_by.to_string(),
        };
        tx.put_type(&rt)?;
        Ok(rt)
    })
}

/// List active resource types; a filter matches exactly or not at all
pub fn list_resource_types(filter: Option<&str>) -> Result<Vec<ResourceType>> {
    read(|d, tx| match filter {
        Some(name) => {
            let mut out = Vec::new();
            if let Some(id) = d.type_names.get(tx, name).map_err(err)? {
                if let Some(row) = d.types.get(tx, &id).map_err(err)? {
                    out.push(serde_json::from_str(row).map_err(err)?);
                }
            }
            Ok(out)
        }
        None => {
            let mut out = Vec::new();
            for item in d.types.iter(tx).map_err(err)? {
                let (_, row) = item.map_err(err)?;
                out.push(serde_json::from_str(row).map_err(err)?);
            }
            Ok(out)
        }
    })
}

/// Fetch an active resource type by id; deleted entities are invisible here
pub fn get_resource_type(id: u64) -> Result<Option<ResourceType>> {
    read(|d, tx| {
        d.types.get(tx, &id).map_err(err)?
            .map(serde_json::from_str)
            .transpose()
            .map_err(err)
    })
}
