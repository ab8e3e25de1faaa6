//! Account state and contract code entries (spec.md §3).

use crate::amount::BigAmount;
use crate::config::EMPTY_HASH;
use serde::{Deserialize, Serialize};

/// The state of a single account, keyed by [`crate::Address`] in the state
/// store.
///
/// `codeHash == EMPTY_HASH` marks a non-contract (externally-owned) account;
/// any other value means the account is a contract and the code store must
/// contain `codeHash -> body` with `SHA256(body) == codeHash` (spec.md §3
/// invariant 4).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Non-negative balance (spec.md §3 invariant 1).
    pub balance: BigAmount,
    /// Strictly increasing by 1 per transaction sent from this account.
    pub nonce: u64,
    /// `EMPTY_HASH` for EOAs; the SHA-256 digest of the deployed code body
    /// otherwise.
    pub code_hash: String,
    /// Merkle root of this account's storage map; `EMPTY_HASH` when empty.
    pub storage_root: String,
}

impl AccountState {
    /// A freshly created account: zero balance, zero nonce, no code, empty
    /// storage (spec.md §3 "Lifecycles").
    pub fn fresh() -> Self {
        Self {
            balance: BigAmount::zero(),
            nonce: 0,
            code_hash: EMPTY_HASH.to_string(),
            storage_root: EMPTY_HASH.to_string(),
        }
    }

    /// Whether this account has deployed contract code.
    pub fn is_contract(&self) -> bool {
        self.code_hash != EMPTY_HASH
    }
}

/// A contract code entry, keyed by `codeHash` in the code store.
///
/// The empty string is stored under `EMPTY_HASH` (spec.md §3 / §9).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// The raw contract source text.
    pub body: String,
}
