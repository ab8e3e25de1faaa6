//! Concrete implementations of the [`crate::ports`] traits.

pub mod memory;

#[cfg(feature = "rocksdb-backend")]
pub mod rocksdb_backend;
