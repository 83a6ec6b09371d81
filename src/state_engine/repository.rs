//! StateRepository - Concurrent Namespace Store
//!
//! In-memory map from namespace key to current state record. Reads never
//! mutate the map; writes are unconditional replace-or-insert with
//! last-write-wins resolution under concurrent callers. Callers always
//! receive clones, never references into the map.

use super::types::StateRecord;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Concurrent namespace -> record store
pub struct StateRepository {
    records: RwLock<HashMap<String, StateRecord>>,
}

impl StateRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Get the stored record for a namespace
    pub async fn get(&self, namespace: &str) -> Option<StateRecord> {
        let records = self.records.read().await;
        records.get(namespace).cloned()
    }

    /// Replace-or-insert the record for a namespace
    pub async fn put(&self, namespace: &str, record: StateRecord) {
        let mut records = self.records.write().await;
        records.insert(namespace.to_string(), record);
    }

    /// Stored record for a namespace, or the supplied default
    ///
    /// The default is never inserted; a read leaves the map untouched.
    pub async fn get_or_default(&self, namespace: &str, default: StateRecord) -> StateRecord {
        let records = self.records.read().await;
        records.get(namespace).cloned().unwrap_or(default)
    }
}

impl Default for StateRepository {
    fn default() -> Self {
        Self::new()
    }
}
