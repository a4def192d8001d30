//! Relic - content store with restorable soft-delete
//!
//! Resource types live in an LMDB-backed table; deleting one moves its
//! full snapshot into a deletion ledger from which a super administrator
//! can restore it verbatim. Deletion is refused while dependent resources
//! reference the type. An optional axum REST server (feature `server`)
//! exposes the HTTP surface.

pub mod auth;
pub mod bootstrap;
pub mod db;
pub mod error;
pub mod ledger;
pub mod model;
pub mod protected;
pub mod resources;
pub mod roles;
pub mod tx;
pub mod types;

#[cfg(feature = "server")]
pub mod server;

pub use db::{clear_all, init, test_lock};
pub use error::{Result, StoreError};
pub use ledger::{restore_item, soft_delete_resource_type};
pub use model::{DeletedItem, Resource, ResourceType, ENTITY_RESOURCE_TYPES};
pub use resources::{create_resource, resource_count_for_type};
pub use roles::{can_create, can_delete, can_restore, Role};
pub use types::{create_resource_type, get_resource_type, list_resource_types};
