//! Transaction wrapper for atomic writes
//!
//! A delete (row removal + ledger snapshot) and a restore (re-insert +
//! ledger consumption) each run inside a single `transact` call, so a
//! failed check mutates nothing.

use heed::RwTxn;

use crate::db::{dbs, env, key, Dbs};
use crate::error::{err, Result};
use crate::model::{DeletedItem, Resource, ResourceType};

/// Transaction wrapper for atomic writes
pub struct Tx {
    txn: Option<RwTxn<'static>>,
    dbs: &'static Dbs,
}

impl Tx {
    #[inline]
    pub(crate) fn new() -> Result<Self> {
        Ok(Tx {
            txn: Some(env()?.write_txn().map_err(err)?),
            dbs: dbs()?,
        })
    }

    #[inline]
    pub(crate) fn tx(&mut self) -> &mut RwTxn<'static> {
        self.txn.as_mut().unwrap()
    }

    #[inline]
    pub(crate) fn dbs(&self) -> &'static Dbs {
        self.dbs
    }

    #[inline]
    pub(crate) fn commit(mut self) -> Result<()> {
        self.txn.take().unwrap().commit().map_err(err)
    }

    // Resource types

    /// Insert or replace an active resource type row and its name index
    pub fn put_type(&mut self, rt: &ResourceType) -> Result<()> {
        let row = serde_json::to_string(rt).map_err(err)?;
        self.dbs.types.put(self.tx(), &rt.resourcetype_id, &row).map_err(err)?;
        self.dbs.type_names.put(self.tx(), &rt.resource_type, &rt.resourcetype_id).map_err(err)
    }

    pub fn get_type(&mut self, id: u64) -> Result<Option<ResourceType>> {
        let raw = self.dbs.types.get(self.tx(), &id).map_err(err)?;
        raw.map(serde_json::from_str).transpose().map_err(err)
    }

    /// Remove an active resource type row and its name index
    pub fn remove_type(&mut self, rt: &ResourceType) -> Result<bool> {
        self.dbs.type_names.delete(self.tx(), &rt.resource_type).map_err(err)?;
        self.dbs.types.delete(self.tx(), &rt.resourcetype_id).map_err(err)
    }

    pub fn type_id_by_name(&mut self, name: &str) -> Result<Option<u64>> {
        self.dbs.type_names.get(self.tx(), name).map_err(err)
    }

    // Restore ledger

    pub fn put_deleted(&mut self, item: &DeletedItem) -> Result<()> {
        let row = serde_json::to_string(item).map_err(err)?;
        self.dbs.deleted.put(self.tx(), &item.item_id, &row).map_err(err)
    }

    pub fn get_deleted(&mut self, item_id: u64) -> Result<Option<DeletedItem>> {
        let raw = self.dbs.deleted.get(self.tx(), &item_id).map_err(err)?;
        raw.map(serde_json::from_str).transpose().map_err(err)
    }

    pub fn remove_deleted(&mut self, item_id: u64) -> Result<bool> {
        self.dbs.deleted.delete(self.tx(), &item_id).map_err(err)
    }

    // Dependent resources

    /// Insert a resource row together with its reverse-index entry
    pub fn put_resource(&mut self, r: &Resource) -> Result<()> {
        let row = serde_json::to_string(r).map_err(err)?;
        self.dbs.resources.put(self.tx(), &r.resource_id, &row).map_err(err)?;
        self.dbs.refs
            .put(self.tx(), &key(r.resourcetype_id, r.resource_id), &1)
            .map_err(err)
    }

    pub fn ref_count(&mut self, type_id: u64) -> Result<usize> {
        Ok(self.dbs.refs
            .prefix_iter(self.tx(), &type_id.to_be_bytes())
            .map_err(err)?
            .count())
    }

    // Users & sessions

    pub fn put_user(&mut self, email: &str, value: &str) -> Result<()> {
        self.dbs.users.put(self.tx(), email, value).map_err(err)
    }

    pub fn put_session(&mut self, token_hash: &str, value: &str) -> Result<()> {
        self.dbs.sessions.put(self.tx(), token_hash, value).map_err(err)
    }

    pub fn remove_session(&mut self, token_hash: &str) -> Result<bool> {
        self.dbs.sessions.delete(self.tx(), token_hash).map_err(err)
    }

    // Counters & flags

    pub fn next_resourcetype_id(&mut self) -> Result<u64> {
        self.bump("next_resourcetype_id")
    }

    pub fn next_item_id(&mut self) -> Result<u64> {
        self.bump("next_item_id")
    }

    pub fn next_resource_id(&mut self) -> Result<u64> {
        self.bump("next_resource_id")
    }

    pub fn set_meta(&mut self, k: &str, v: &str) -> Result<()> {
        self.dbs.meta.put(self.tx(), k, v).map_err(err)
    }

    /// Monotonic counter; ids start at 1 and are never reused
    fn bump(&mut self, counter: &str) -> Result<u64> {
        let id = self.dbs.meta
            .get(self.tx(), counter)
            .map_err(err)?
            .and_then(|s| s.parse().ok())
            .unwrap_or(1u64);
        self.dbs.meta.put(self.tx(), counter, &(id + 1).to_string()).map_err(err)?;
        Ok(id)
    }
}

/// Run multiple operations in a single transaction
#[inline]
pub fn transact<T, F: FnOnce(&mut Tx) -> Result<T>>(f: F) -> Result<T> {
    let mut tx = Tx::new()?;
    let r = f(&mut tx)?;
    tx.commit()?;
    Ok(r)
}
