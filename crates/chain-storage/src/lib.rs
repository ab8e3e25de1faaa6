//! # Chain Storage
//!
//! The persistence adapter (spec.md §6): trait ports for the two ordered
//! key-value stores (`stateDB`, `codeDB`) and for per-account storage, plus
//! an in-memory adapter for tests and an optional rocksdb-backed adapter for
//! production, enabled with the `rocksdb-backend` feature.
//!
//! The engine (`state-transition`) only ever talks to the trait objects in
//! [`ports`]; nothing here is consensus-critical, so adapters are free to
//! buffer, cache, or batch internally as long as `get` observes the most
//! recent `put`.

pub mod adapters;
pub mod errors;
pub mod ports;

pub use adapters::memory::{InMemoryAccountStorage, InMemoryKvStore};
pub use errors::StorageError;
pub use ports::{AccountStorage, AccountStorageHandle, KvStore};

#[cfg(feature = "rocksdb-backend")]
pub use adapters::rocksdb_backend::{RocksDbAccountStorage, RocksDbKvStore};
