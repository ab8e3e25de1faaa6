//! Key encoding and (de)serialization shared by every reader/writer of
//! `stateDB` and `codeDB` (spec.md §6). Centralized here so `tx-validation`
//! and `state-transition` can never disagree on the wire representation.

use chain_storage::{KvStore, StorageError};
use chain_types::{Address, AccountState, CodeEntry};

/// The key an [`AccountState`] is stored under in `stateDB`.
pub fn account_key(address: &Address) -> Vec<u8> {
    address.as_str().as_bytes().to_vec()
}

/// The key a [`CodeEntry`] is stored under in `codeDB`.
pub fn code_key(code_hash: &str) -> Vec<u8> {
    code_hash.as_bytes().to_vec()
}

fn decode_account(key: &[u8], bytes: &[u8]) -> Result<AccountState, StorageError> {
    bincode::deserialize(bytes).map_err(|err| StorageError::Corrupt {
        key: String::from_utf8_lossy(key).into_owned(),
        reason: err.to_string(),
    })
}

/// Read an account from `stateDB`, if present.
pub async fn load_account(
    state_db: &dyn KvStore,
    address: &Address,
) -> Result<Option<AccountState>, StorageError> {
    let key = account_key(address);
    match state_db.get(&key).await? {
        Some(bytes) => Ok(Some(decode_account(&key, &bytes)?)),
        None => Ok(None),
    }
}

/// Encode an account for a `stateDB` write.
pub fn encode_account(account: &AccountState) -> Vec<u8> {
    bincode::serialize(account).expect("AccountState serialization is infallible")
}

/// Read a code entry from `codeDB`, if present.
pub async fn load_code(
    code_db: &dyn KvStore,
    code_hash: &str,
) -> Result<Option<CodeEntry>, StorageError> {
    let key = code_key(code_hash);
    match code_db.get(&key).await? {
        Some(bytes) => {
            let entry: CodeEntry =
                bincode::deserialize(&bytes).map_err(|err| StorageError::Corrupt {
                    key: String::from_utf8_lossy(&key).into_owned(),
                    reason: err.to_string(),
                })?;
            Ok(Some(entry))
        }
        None => Ok(None),
    }
}

/// Encode a code entry for a `codeDB` write.
pub fn encode_code(entry: &CodeEntry) -> Vec<u8> {
    bincode::serialize(entry).expect("CodeEntry serialization is infallible")
}
