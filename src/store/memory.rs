//! In-memory store implementation for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::LedgerStore;
use crate::types::{WealthRecord, WealthResult};

/// In-memory ledger store
///
/// Clones share the same underlying map, so a store handed to a ledger can
/// still be inspected from a test.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<u64, WealthRecord>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all records (useful for testing)
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn find_by_id(&self, user_id: u64) -> WealthResult<Option<WealthRecord>> {
        Ok(self.records.read().unwrap().get(&user_id).cloned())
    }

    async fn save(&self, record: &WealthRecord) -> WealthResult<()> {
        self.records
            .write()
            .unwrap()
            .insert(record.user_id, record.clone());
        Ok(())
    }
}
