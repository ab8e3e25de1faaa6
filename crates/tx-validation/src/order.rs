//! `hasValidTxOrder` (spec.md §4.6): each sender's transactions within the
//! block must replay its nonce sequence with no gaps and no reordering.

use std::collections::HashMap;

use chain_storage::{KvStore, StorageError};
use chain_types::{Address, Block};

use crate::{codec, records};

/// `hasValidTxOrder(block, stateDB)`. Returns `Ok(false)` for an ordinary
/// rejection (a gap, a reorder, or a signature that fails to recover);
/// store faults propagate through `Err` (spec.md §7).
pub async fn has_valid_tx_order(
    block: &Block,
    state_db: &dyn KvStore,
) -> Result<bool, StorageError> {
    let mut expected: HashMap<Address, u64> = HashMap::new();

    for tx in &block.transactions {
        let sender = match codec::recover_sender(tx) {
            Ok(sender) => sender,
            Err(_) => return Ok(false),
        };

        let required_nonce = match expected.get(&sender) {
            Some(next) => *next,
            None => match records::load_account(state_db, &sender).await? {
                Some(account) => account.nonce + 1,
                None => return Ok(false),
            },
        };

        if tx.nonce != required_nonce {
            return Ok(false);
        }
        expected.insert(sender, required_nonce + 1);
    }

    Ok(true)
}
