//! Store — the ledger persisted as a single record in an opaque key-value
//! collaborator.
//!
//! Every operation is a full load-modify-save cycle; the ledger is never
//! cached across operations, so concurrent writers are tolerated (last
//! writer wins, no detection). An absent record is a valid empty ledger,
//! never an error.

use crate::error::StoreError;
use crate::types::{Ledger, MissRecord};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

// ---------------------------------------------------------------------------
// Key-value collaborator
// ---------------------------------------------------------------------------

/// The opaque external store the ledger lives in: one string value per
/// named key. Implementations provide their own durability; callers make a
/// single attempt per operation.
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryKv {
    records: Mutex<HashMap<String, String>>,
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON document per key under a data directory.
///
/// Writes go through a temp file and rename, so a crashed write leaves the
/// previous record intact rather than a torn one.
#[derive(Debug, Clone)]
pub struct JsonFileKv {
    dir: PathBuf,
}

impl JsonFileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for JsonFileKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Unavailable(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ledger store
// ---------------------------------------------------------------------------

/// Loads, mutates, and saves the whole ledger as one atomic record.
#[derive(Debug)]
pub struct LedgerStore<S> {
    kv: S,
    key: String,
}

impl<S: KvStore> LedgerStore<S> {
    pub fn new(kv: S, key: impl Into<String>) -> Self {
        Self { kv, key: key.into() }
    }

    /// The current ledger, or an empty one if nothing has been persisted yet.
    pub fn load(&self) -> Result<Ledger, StoreError> {
        match self.kv.get(&self.key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Deserialize {
                key: self.key.clone(),
                source,
            }),
            None => Ok(Ledger::new()),
        }
    }

    /// Overwrite the persisted ledger with `ledger`.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let raw = serde_json::to_string(ledger).map_err(StoreError::Serialize)?;
        self.kv.set(&self.key, &raw)
    }

    /// Record one zero-result occurrence of `query` at the current time.
    pub fn record_miss(&self, query: &str) -> Result<(), StoreError> {
        self.record_miss_at(query, chrono::Utc::now().timestamp())
    }

    /// Record one zero-result occurrence of `query` at timestamp `ts`.
    ///
    /// Upserts in place: a previously unseen query gets a fresh record with
    /// count 1; a known query has its count incremented and `latest`
    /// refreshed. Never creates a duplicate.
    pub fn record_miss_at(&self, query: &str, ts: i64) -> Result<(), StoreError> {
        let mut ledger = self.load()?;
        ledger
            .entry(query.to_string())
            .and_modify(|record| record.touch(ts))
            .or_insert_with(|| MissRecord::first_seen(ts));
        self.save(&ledger)
    }
}
