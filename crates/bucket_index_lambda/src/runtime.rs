pub use bucket_index_core::{contract, error, transform};
