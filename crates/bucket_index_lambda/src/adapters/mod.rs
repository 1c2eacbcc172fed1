pub mod index_store;
pub mod memory;
