//! In-memory adapters for tests: a `HashMap`-backed [`KvStore`] and
//! [`AccountStorage`], guarded by `tokio::sync::RwLock` so the async trait
//! methods never block a runtime thread.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chain_types::Address;
use tokio::sync::RwLock;

use crate::errors::StorageError;
use crate::ports::{AccountStorage, AccountStorageHandle, KvStore};

/// In-memory ordered key-value store. Used for `stateDB` and `codeDB` in
/// tests; `keys()` sorts on every call rather than maintaining a separate
/// index, which is fine at test scale.
#[derive(Default)]
pub struct InMemoryKvStore {
    data: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKvStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.data
            .write()
            .await
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    async fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StorageError> {
        let mut guard = self.data.write().await;
        for (key, value) in entries {
            guard.insert(key, value);
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<Vec<u8>>, StorageError> {
        let mut keys: Vec<Vec<u8>> = self.data.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// In-memory per-account storage. Committed key-value pairs for an account
/// survive across `open`/`close` cycles; only one handle per address may be
/// open at a time, matching the production adapter's file-lock behavior.
#[derive(Default)]
pub struct InMemoryAccountStorage {
    accounts: Arc<RwLock<HashMap<Address, HashMap<String, String>>>>,
    open: Arc<RwLock<HashSet<Address>>>,
}

impl InMemoryAccountStorage {
    /// An empty store with no accounts.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStorage for InMemoryAccountStorage {
    async fn open(
        &self,
        address: &Address,
    ) -> Result<Box<dyn AccountStorageHandle>, StorageError> {
        let mut open = self.open.write().await;
        if !open.insert(address.clone()) {
            return Err(StorageError::AlreadyOpen {
                address: address.to_string(),
            });
        }
        Ok(Box::new(InMemoryAccountHandle {
            address: address.clone(),
            accounts: self.accounts.clone(),
            open: self.open.clone(),
            closed: false,
        }))
    }
}

struct InMemoryAccountHandle {
    address: Address,
    accounts: Arc<RwLock<HashMap<Address, HashMap<String, String>>>>,
    open: Arc<RwLock<HashSet<Address>>>,
    closed: bool,
}

#[async_trait]
impl AccountStorageHandle for InMemoryAccountHandle {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.closed {
            return Err(StorageError::NotOpen {
                address: self.address.to_string(),
            });
        }
        Ok(self
            .accounts
            .read()
            .await
            .get(&self.address)
            .and_then(|kv| kv.get(key))
            .cloned())
    }

    async fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.closed {
            return Err(StorageError::NotOpen {
                address: self.address.to_string(),
            });
        }
        self.accounts
            .write()
            .await
            .entry(self.address.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        if self.closed {
            return Err(StorageError::NotOpen {
                address: self.address.to_string(),
            });
        }
        let mut keys: Vec<String> = self
            .accounts
            .read()
            .await
            .get(&self.address)
            .map(|kv| kv.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        Ok(keys)
    }

    async fn close(mut self: Box<Self>) -> Result<(), StorageError> {
        self.closed = true;
        self.open.write().await.remove(&self.address);
        Ok(())
    }
}
