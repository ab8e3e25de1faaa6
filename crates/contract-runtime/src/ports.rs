//! The `run` I/O contract (spec.md §4.7): deterministic, read-only access to
//! `states_overlay`/`stateDB`, bounded by `gas_budget`, returning the full
//! updated account map and the invoked contract's full storage map.

use std::collections::HashMap;

use async_trait::async_trait;
use chain_storage::KvStore;
use chain_types::{AccountState, Address, BigAmount, Block, Transaction};

use crate::errors::RuntimeError;

/// What `run` is told about the account it is invoked on.
#[derive(Clone, Debug)]
pub struct ContractInfo {
    /// The contract's own address (the transaction recipient).
    pub address: Address,
}

/// The account-state working set `run` reads and rewrites. Entries absent
/// here may still exist in `stateDB`; a conforming executor consults both.
pub type StatesOverlay = HashMap<Address, AccountState>;

/// A contract's per-key storage view for this invocation. Storage is
/// rewritten wholesale per block (spec.md §3 Lifecycles) — an executor does
/// not need to, and does not, see a prior block's storage.
pub type StorageOverlay = HashMap<String, String>;

/// A deterministic contract interpreter, swappable independently of the
/// engine that invokes it (spec.md §1: the interpreter's internal opcode
/// semantics are a black box with a defined I/O contract).
#[async_trait]
pub trait ContractExecutor: Send + Sync {
    /// Execute `code` for one contract invocation.
    ///
    /// `states_overlay` is the engine's current working set, `state_db` the
    /// persisted account store for addresses not yet touched this block.
    /// Neither may be written directly; every mutation is expressed in the
    /// returned maps. Must stop and return cleanly, not fail, once cumulative
    /// cost would exceed `gas_budget`.
    async fn run(
        &self,
        code: &str,
        states_overlay: &StatesOverlay,
        gas_budget: &BigAmount,
        state_db: &dyn KvStore,
        block: &Block,
        tx: &Transaction,
        contract_info: &ContractInfo,
    ) -> Result<(StatesOverlay, StorageOverlay), RuntimeError>;
}
