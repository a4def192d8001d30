//! Seeding: super administrator account and default resource types

use crate::db::read;
use crate::error::{err, Result};
use crate::roles::Role;
use crate::tx::transact;
use crate::{auth, types};

/// Content types every fresh deployment starts with
pub const DEFAULT_RESOURCE_TYPES: &[&str] =
    &["bible", "commentary", "dictionary", "infographic"];

/// Seed the store; idempotent across restarts
pub fn seed(super_email: &str, super_password: &str) -> Result<()> {
    let seeded = read(|d, tx| Ok(d.meta.get(tx, "seeded").map_err(err)?.is_some()))?;
    if seeded {
        return Ok(());
    }
    auth::register_user(super_email, super_password, Role::SuperAdmin)?;
    for name in DEFAULT_RESOURCE_TYPES {
        // A run that died before setting the flag may have created some
        // defaults already; skip those instead of conflicting forever.
        let exists = read(|d, tx| Ok(d.type_names.get(tx, name).map_err(err)?.is_some()))?;
        if !exists {
            types::create_resource_type(super_email, name)?;
        }
    }
    transact(|tx| tx.set_meta("seeded", "1"))
}
