use std::future::Future;

use crate::runtime::contract::IndexItem;

/// Durable table keyed by `IndexItem::key`.
///
/// `put_item` is a single unconditional upsert: an existing item with the same
/// key is replaced whole. Implementations make exactly one attempt.
pub trait IndexStore {
    fn put_item(&self, item: &IndexItem) -> impl Future<Output = Result<(), String>> + Send;
}
