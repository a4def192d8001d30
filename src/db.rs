//! Database types and global state

use std::path::Path;
use std::sync::{Mutex, OnceLock};

use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions, RoTxn};

use crate::error::{err, Result, StoreError};

// Database type aliases
pub type DbRow = Database<U64<byteorder::BigEndian>, Str>;
pub type DbName = Database<Str, U64<byteorder::BigEndian>>;
pub type DbRefs = Database<Bytes, U64<byteorder::BigEndian>>;
pub type DbStr = Database<Str, Str>;

/// Create a 16-byte key from two u64 values
#[inline]
pub fn key(a: u64, b: u64) -> [u8; 16] {
    let mut k = [0u8; 16];
    k[..8].copy_from_slice(&a.to_be_bytes());
    k[8..].copy_from_slice(&b.to_be_bytes());
    k
}

/// All database handles
pub struct Dbs {
    /// resourcetype_id -> JSON row (active entities only)
    pub types: DbRow,
    /// resource_type name -> resourcetype_id (uniqueness + exact-match filter)
    pub type_names: DbName,
    /// item_id -> JSON snapshot (the restore ledger)
    pub deleted: DbRow,
    /// resource_id -> JSON row (dependent entities)
    pub resources: DbRow,
    /// key(resourcetype_id, resource_id) -> 1 (reverse index for conflict checks)
    pub refs: DbRefs,
    /// email -> salt|password_hash|role
    pub users: DbStr,
    /// sha256(token) -> email|created_at|expires_at
    pub sessions: DbStr,
    /// counters and flags
    pub meta: DbStr,
}

impl Dbs {
    /// Count dependent resources referencing a resource type
    pub fn ref_count(&self, tx: &RoTxn, type_id: u64) -> Result<usize> {
        Ok(self
            .refs
            .prefix_iter(tx, &type_id.to_be_bytes())
            .map_err(err)?
            .count())
    }
}

// Global state
pub static ENV: OnceLock<Env> = OnceLock::new();
pub static DBS: OnceLock<Dbs> = OnceLock::new();
pub static TEST_LOCK: Mutex<()> = Mutex::new(());
pub static INIT_PATH: OnceLock<String> = OnceLock::new();

/// Get the database handles, or error if not initialized
#[inline]
pub fn dbs() -> Result<&'static Dbs> {
    DBS.get()
        .ok_or_else(|| StoreError::Storage("Not initialized".into()))
}

/// Get the environment, or error if not initialized
#[inline]
pub fn env() -> Result<&'static Env> {
    ENV.get()
        .ok_or_else(|| StoreError::Storage("Not initialized".into()))
}

/// Execute a read-only operation
#[inline]
pub fn read<T, F: FnOnce(&Dbs, &RoTxn) -> Result<T>>(f: F) -> Result<T> {
    f(dbs()?, &env()?.read_txn().map_err(err)?)
}

/// Initialize the database
pub fn init(path: &str) -> Result<()> {
    if let Some(p) = INIT_PATH.get() {
        return if p == path {
            Ok(())
        } else {
            Err(StoreError::Storage(format!("Already init at {}", p)))
        };
    }
    std::fs::create_dir_all(path).map_err(err)?;
    // SAFETY: LMDB requires no other processes access this path concurrently during open.
    let e = unsafe {
        EnvOpenOptions::new()
            .map_size(1 << 30)
            .max_dbs(8)
            .open(Path::new(path))
            .map_err(err)?
    };
    let mut tx = e.write_txn().map_err(err)?;
    let d = Dbs {
        types: e.create_database(&mut tx, Some("types")).map_err(err)?,
        type_names: e.create_database(&mut tx, Some("type_names")).map_err(err)?,
        deleted: e.create_database(&mut tx, Some("deleted")).map_err(err)?,
        resources: e.create_database(&mut tx, Some("resources")).map_err(err)?,
        refs: e.create_database(&mut tx, Some("refs")).map_err(err)?,
        users: e.create_database(&mut tx, Some("users")).map_err(err)?,
        sessions: e.create_database(&mut tx, Some("sessions")).map_err(err)?,
        meta: e.create_database(&mut tx, Some("meta")).map_err(err)?,
    };
    tx.commit().map_err(err)?;
    let _ = (ENV.set(e), DBS.set(d), INIT_PATH.set(path.to_string()));
    Ok(())
}

/// Clear all databases (for testing)
pub fn clear_all() -> Result<()> {
    crate::tx::transact(|tx| {
        tx.dbs().types.clear(tx.tx()).map_err(err)?;
        tx.dbs().type_names.clear(tx.tx()).map_err(err)?;
        tx.dbs().deleted.clear(tx.tx()).map_err(err)?;
        tx.dbs().resources.clear(tx.tx()).map_err(err)?;
        tx.dbs().refs.clear(tx.tx()).map_err(err)?;
        tx.dbs().users.clear(tx.tx()).map_err(err)?;
        tx.dbs().sessions.clear(tx.tx()).map_err(err)?;
        tx.dbs().meta.clear(tx.tx()).map_err(err)
    })
}

/// Get the test lock (for single-threaded tests)
pub fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    TEST_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}
