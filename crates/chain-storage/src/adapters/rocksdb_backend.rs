//! Production adapters backed by `rocksdb`, gated behind the
//! `rocksdb-backend` feature so the default build needs no C++ toolchain.
//!
//! Per-account storage gets its own rocksdb instance, one directory per
//! address under a configured root, opened exclusively with an `fs2` flock
//! so two processes (or two overlapping `open` calls) can never touch the
//! same account's data at once — the production counterpart of the
//! in-memory adapter's open-set check.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chain_types::Address;
use fs2::FileExt;
use rocksdb::{Options, DB};

use crate::errors::StorageError;
use crate::ports::{AccountStorage, AccountStorageHandle, KvStore};

fn backend_err(err: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(err.to_string())
}

/// A rocksdb-backed [`KvStore`]. Used for `stateDB` and `codeDB`.
pub struct RocksDbKvStore {
    db: DB,
}

impl RocksDbKvStore {
    /// Open (creating if absent) a rocksdb database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path).map_err(backend_err)?;
        Ok(Self { db })
    }
}

#[async_trait]
impl KvStore for RocksDbKvStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        self.db.get(key).map_err(backend_err)
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.db.put(key, value).map_err(backend_err)
    }

    async fn put_batch(&self, entries: Vec<(Vec<u8>, Vec<u8>)>) -> Result<(), StorageError> {
        let mut batch = rocksdb::WriteBatch::default();
        for (key, value) in entries {
            batch.put(key, value);
        }
        self.db.write(batch).map_err(backend_err)
    }

    async fn keys(&self) -> Result<Vec<Vec<u8>>, StorageError> {
        let mut keys: Vec<Vec<u8>> = self
            .db
            .iterator(rocksdb::IteratorMode::Start)
            .map(|item| item.map(|(key, _)| key.to_vec()).map_err(backend_err))
            .collect::<Result<_, _>>()?;
        keys.sort();
        Ok(keys)
    }
}

const LOCK_FILE: &str = "LOCK";

/// Per-account storage rooted at one directory: `root/<address>/` holds a
/// rocksdb instance plus a sibling `LOCK` file enforcing exclusive `open`.
pub struct RocksDbAccountStorage {
    root: PathBuf,
    open: Arc<Mutex<HashSet<Address>>>,
}

impl RocksDbAccountStorage {
    /// Use `root` as the parent directory for every account's storage
    /// subdirectory, creating it if absent.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(backend_err)?;
        Ok(Self {
            root,
            open: Arc::new(Mutex::new(HashSet::new())),
        })
    }

    fn account_dir(&self, address: &Address) -> PathBuf {
        self.root.join(address.as_str())
    }
}

#[async_trait]
impl AccountStorage for RocksDbAccountStorage {
    async fn open(
        &self,
        address: &Address,
    ) -> Result<Box<dyn AccountStorageHandle>, StorageError> {
        {
            let mut open = self.open.lock().expect("account-storage open-set lock poisoned");
            if !open.insert(address.clone()) {
                return Err(StorageError::AlreadyOpen {
                    address: address.to_string(),
                });
            }
        }

        let dir = self.account_dir(address);
        if let Err(err) = std::fs::create_dir_all(&dir) {
            self.open.lock().expect("lock poisoned").remove(address);
            return Err(backend_err(err));
        }

        let lock_path = dir.join(LOCK_FILE);
        let lock_file = match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)
        {
            Ok(file) => file,
            Err(err) => {
                self.open.lock().expect("lock poisoned").remove(address);
                return Err(backend_err(err));
            }
        };
        if let Err(err) = lock_file.try_lock_exclusive() {
            self.open.lock().expect("lock poisoned").remove(address);
            return Err(StorageError::AlreadyOpen {
                address: format!("{address} ({err})"),
            });
        }

        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = match DB::open(&opts, dir.join("db")) {
            Ok(db) => db,
            Err(err) => {
                let _ = lock_file.unlock();
                self.open.lock().expect("lock poisoned").remove(address);
                return Err(backend_err(err));
            }
        };

        Ok(Box::new(RocksDbAccountHandle {
            address: address.clone(),
            db: Some(db),
            lock_file: Some(lock_file),
            open: self.open.clone(),
        }))
    }
}

struct RocksDbAccountHandle {
    address: Address,
    db: Option<DB>,
    lock_file: Option<File>,
    open: Arc<Mutex<HashSet<Address>>>,
}

impl RocksDbAccountHandle {
    fn db(&self) -> Result<&DB, StorageError> {
        self.db.as_ref().ok_or_else(|| StorageError::NotOpen {
            address: self.address.to_string(),
        })
    }
}

#[async_trait]
impl AccountStorageHandle for RocksDbAccountHandle {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let bytes = self.db()?.get(key.as_bytes()).map_err(backend_err)?;
        bytes
            .map(|bytes| {
                String::from_utf8(bytes).map_err(|err| StorageError::Corrupt {
                    key: key.to_string(),
                    reason: err.to_string(),
                })
            })
            .transpose()
    }

    async fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db()?
            .put(key.as_bytes(), value.as_bytes())
            .map_err(backend_err)
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self
            .db()?
            .iterator(rocksdb::IteratorMode::Start)
            .map(|item| {
                item.map_err(backend_err).and_then(|(key, _)| {
                    String::from_utf8(key.to_vec()).map_err(|err| StorageError::Corrupt {
                        key: hex::encode(&key),
                        reason: err.to_string(),
                    })
                })
            })
            .collect::<Result<_, _>>()?;
        keys.sort();
        Ok(keys)
    }

    async fn close(mut self: Box<Self>) -> Result<(), StorageError> {
        self.db.take();
        if let Some(lock_file) = self.lock_file.take() {
            let _ = lock_file.unlock();
        }
        self.open
            .lock()
            .expect("account-storage open-set lock poisoned")
            .remove(&self.address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(hex_char: char) -> Address {
        Address::new(hex_char.to_string().repeat(64)).unwrap()
    }

    #[tokio::test]
    async fn kv_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbKvStore::open(dir.path()).unwrap();
        store.put(b"a", b"1").await.unwrap();
        assert_eq!(store.get(b"a").await.unwrap(), Some(b"1".to_vec()));
    }

    #[tokio::test]
    async fn account_storage_rejects_double_open() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RocksDbAccountStorage::new(dir.path()).unwrap();
        let address = addr('a');

        let _handle = storage.open(&address).await.unwrap();
        assert!(storage.open(&address).await.is_err());
    }

    #[tokio::test]
    async fn account_storage_allows_reopen_after_close() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RocksDbAccountStorage::new(dir.path()).unwrap();
        let address = addr('b');

        let mut handle = storage.open(&address).await.unwrap();
        handle.put("k", "v").await.unwrap();
        handle.close().await.unwrap();

        let handle = storage.open(&address).await.unwrap();
        assert_eq!(handle.get("k").await.unwrap(), Some("v".to_string()));
    }
}
