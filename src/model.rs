//! Entity records stored as JSON rows
//!
//! Field names follow the wire format of the HTTP surface, so a stored
//! row, a ledger snapshot, and a response body are the same document.

use serde::{Deserialize, Serialize};

/// Ledger tag for the resource type table
pub const ENTITY_RESOURCE_TYPES: &str = "resource_types";

/// A named category of content resource (e.g. "bible", "commentary")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    #[serde(rename = "resourcetypeId")]
    pub resourcetype_id: u64,
    /// Naming token, no whitespace allowed; case-sensitively unique
    /// among active entities
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
}

/// A soft-deleted entity's snapshot in the restore ledger
///
/// `record` is the full row at deletion time, sufficient to reconstruct
/// the entity verbatim. The `item_id` space is independent of the
/// entity's own id space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedItem {
    #[serde(rename = "itemId")]
    pub item_id: u64,
    #[serde(rename = "entityType")]
    pub entity_type: String,
    pub record: ResourceType,
}

/// A content resource depending on a resource type
///
/// Only the fields needed for the referential-integrity check are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "resourceId")]
    pub resource_id: u64,
    #[serde(rename = "resourcetypeId")]
    pub resourcetype_id: u64,
    pub language: String,
    pub version: String,
    pub year: u64,
}
