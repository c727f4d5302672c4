pub mod kv;
pub mod schema;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
