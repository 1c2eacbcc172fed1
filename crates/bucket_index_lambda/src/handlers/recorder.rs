use crate::adapters::index_store::IndexStore;
use crate::runtime::contract::IndexItem;
use crate::runtime::error::StorageWriteError;

/// Writes index items to the durable table it was constructed with.
///
/// The store is owned for the lifetime of the runtime instance and reused
/// across invocations. There is no retry: a failed put is returned to the
/// caller as-is.
#[derive(Debug)]
pub struct Recorder<S> {
    store: S,
}

impl<S: IndexStore> Recorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn record(&self, item: &IndexItem) -> Result<(), StorageWriteError> {
        match self.store.put_item(item).await {
            Ok(()) => {
                tracing::info!(
                    component = "recorder",
                    event = "item_written",
                    key = %item.key,
                    timestamp = %item.timestamp,
                    "inserted {} at {}",
                    item.key,
                    item.timestamp
                );
                Ok(())
            }
            Err(message) => {
                tracing::error!(
                    component = "recorder",
                    event = "item_write_failed",
                    key = %item.key,
                    error = %message,
                    "error inserting into table"
                );
                Err(StorageWriteError::for_key(item.key.clone(), message))
            }
        }
    }
}
