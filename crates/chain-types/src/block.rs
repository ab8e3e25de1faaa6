//! Block structure (spec.md §3 / §4.4).
//!
//! Hash derivation, `txRoot` computation, and prop-type validation are
//! `tx-validation`'s job (they need `chain-crypto`'s hasher and Merkle
//! builder); this module only defines the wire shape.

use crate::address::Address;
use crate::amount::BigAmount;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Block header fields (spec.md §3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Height of this block in the chain.
    pub block_number: u64,
    /// Unix timestamp the block was produced at.
    pub timestamp: u64,
    /// Proof-of-work difficulty target (mining itself is out of scope,
    /// spec.md §1; this field is carried through for hashing and is not
    /// otherwise interpreted by the engine).
    pub difficulty: u64,
    /// Hash of the preceding block.
    pub parent_hash: String,
    /// Proof-of-work nonce (opaque to the engine).
    pub nonce: u64,
    /// Merkle root of the indexed transaction list
    /// (spec.md §4.2 "Transaction indexing for txRoot").
    pub tx_root: String,
    /// Address credited with the block reward and collected gas fees.
    pub coinbase: Address,
    /// `SHA256(blockNumber || timestamp || txRoot || difficulty ||
    /// parentHash || nonce)` (spec.md §3 invariant 7).
    pub hash: String,
}

/// A complete block: header plus an ordered transaction list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// The block header.
    pub header: BlockHeader,
    /// Transactions in submission order; order is consensus-relevant
    /// (spec.md §4.2, §5 — replay is not commutative).
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Sum of `contractGas` declared across every transaction in the block
    /// (spec.md §4.6 `hasValidGasLimit` — base `gas` is deliberately not
    /// counted, matching the preserved source behavior noted in spec.md §9).
    pub fn total_contract_gas(&self) -> BigAmount {
        self.transactions
            .iter()
            .filter_map(|tx| tx.additional_data.contract_gas.as_ref())
            .fold(BigAmount::zero(), |acc, g| &acc + g)
    }
}
