//! redb-based key-value storage for store snapshots
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `snapshots` | snapshot key | JSON bytes | One serialized snapshot per store |
//!
//! # Snapshot keys
//!
//! | Key | Contents |
//! |-----|----------|
//! | [`CATALOG_KEY`] | `Product[]` |
//! | [`CART_KEY`] | `CartItem[]` |
//! | [`WISHLIST_KEY`] | product id strings |
//! | [`RECENTLY_VIEWED_KEY`] | product id strings, most recent first |
//!
//! Every store rewrites its whole snapshot after each change. Writes are
//! best effort: a failed write is logged and the in-memory state is kept.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use shared::AppError;
use std::path::Path;
use thiserror::Error;

/// Table for snapshots: key = snapshot key, value = JSON bytes
const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

pub const CATALOG_KEY: &str = "admin_products";
pub const CART_KEY: &str = "cart";
pub const WISHLIST_KEY: &str = "wishlist";
pub const RECENTLY_VIEWED_KEY: &str = "recentlyViewed";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => AppError::serialization(e.to_string()),
            other => AppError::storage(other.to_string()),
        }
    }
}

/// Durable key-value store the state layer persists into
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Key-value store backed by redb
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate` by default, so a snapshot is
    /// on disk as soon as `set` returns.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Database::create(path)?)
    }

    /// Open an in-memory database (tests, ephemeral sessions)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }
}

impl KvStore for RedbStore {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;
        Ok(table.get(key)?.map(|value| value.value().to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(SNAPSHOTS_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Serialize `value` and write it under `key`
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn KvStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let bytes = serde_json::to_vec(value)?;
    storage.set(key, &bytes)
}

/// Best-effort snapshot write: failures are logged, never returned
pub(crate) fn persist<T: Serialize + ?Sized>(storage: &dyn KvStore, key: &str, value: &T) {
    if let Err(e) = save_json(storage, key, value) {
        tracing::warn!(key, error = %e, "Failed to persist snapshot");
    }
}

/// Read the raw snapshot for `key`, logging read failures as absent
pub(crate) fn load_raw(storage: &dyn KvStore, key: &str) -> Option<Vec<u8>> {
    match storage.get(key) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to read snapshot");
            None
        }
    }
}

/// Read a list of product ids (wishlist / recently viewed snapshots)
///
/// Malformed data is logged and treated as absent.
pub(crate) fn load_ids(storage: &dyn KvStore, key: &str) -> Vec<String> {
    let Some(bytes) = load_raw(storage, key) else {
        return Vec::new();
    };
    match serde_json::from_slice::<Vec<String>>(&bytes) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(key, error = %e, "Malformed snapshot, starting empty");
            Vec::new()
        }
    }
}
