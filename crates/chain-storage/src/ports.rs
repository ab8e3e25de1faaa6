//! Outbound persistence ports (spec.md §6).
//!
//! Every method suspends (spec.md §5: "every store interaction may yield to
//! the scheduler"), so the ports are `#[async_trait]` rather than plain
//! traits, matching the reference workspace's async port convention.

use async_trait::async_trait;
use chain_types::Address;

use crate::errors::StorageError;

/// An ordered key-value store: the shape both `stateDB` and `codeDB`
/// require. Keys and values are opaque bytes; callers own the encoding
/// (bincode for structured records, UTF-8 for hex-string keys).
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value at `key`, if present.
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a single key-value pair.
    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Apply every pair in `entries` as one unit. A partial failure must
    /// leave the store unchanged (spec.md §5's all-or-nothing commit).
    async fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StorageError>;

    /// All keys currently present, in ascending lexicographic order.
    async fn keys(&self) -> Result<Vec<Vec<u8>>, StorageError>;
}

/// Per-account storage (spec.md §4.5 step 6: "open the account's storage
/// database, write every touched key, close it"). A production adapter
/// enforces the exclusivity invariant with a directory-scoped file lock; the
/// in-memory adapter enforces it with a simple open-set.
#[async_trait]
pub trait AccountStorage: Send + Sync {
    /// Open the per-account storage for `address`, failing if another
    /// caller already holds it open.
    async fn open(
        &self,
        address: &Address,
    ) -> Result<Box<dyn AccountStorageHandle>, StorageError>;
}

/// A single account's open storage database.
#[async_trait]
pub trait AccountStorageHandle: Send + Sync {
    /// Fetch the value stored at `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `key` to `value`.
    async fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// All keys currently present, in ascending lexicographic order —
    /// the order the Merkle Builder (spec.md §4.2) requires for
    /// `storageRoot`.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Release the handle, allowing a future `open` to succeed.
    async fn close(self: Box<Self>) -> Result<(), StorageError>;
}
