use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::adapters::index_store::IndexStore;
use crate::runtime::contract::IndexItem;

/// Process-local table with the same upsert semantics as the durable store.
#[derive(Debug, Default)]
pub struct InMemoryIndexStore {
    items: Mutex<BTreeMap<String, IndexItem>>,
    puts: Mutex<Vec<String>>,
}

impl InMemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<IndexItem> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .cloned()
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<IndexItem> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    /// Keys in the order their puts were issued, duplicates included.
    pub fn put_log(&self) -> Vec<String> {
        self.puts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl IndexStore for InMemoryIndexStore {
    async fn put_item(&self, item: &IndexItem) -> Result<(), String> {
        self.puts
            .lock()
            .map_err(|_| "in-memory put log lock poisoned".to_string())?
            .push(item.key.clone());
        self.items
            .lock()
            .map_err(|_| "in-memory table lock poisoned".to_string())?
            .insert(item.key.clone(), item.clone());
        Ok(())
    }
}
