//! `hasValidGasLimit` (spec.md §4.6).

use chain_types::{Block, ChainConfig};

/// `Σ contractGas <= BLOCK_GAS_LIMIT`. Base `gas` is not counted — this
/// matches the behavior spec.md §9 flags as a probable source quirk, not a
/// redesign target.
pub fn has_valid_gas_limit(block: &Block, config: &ChainConfig) -> bool {
    block.total_contract_gas() <= config.block_gas_limit
}
