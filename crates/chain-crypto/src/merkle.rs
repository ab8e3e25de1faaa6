//! Binary Merkle root over an ordered leaf list (spec.md §4.2).
//!
//! Used for both `txRoot` (over indexed, canonically-encoded transactions)
//! and per-account `storageRoot` (over `"key value"` pairs in sorted key
//! order) — callers are responsible for building the leaf strings in the
//! convention their root requires; this module only builds the tree.

use crate::hashing::sha256_hex;
use chain_types::EMPTY_HASH;

/// Compute the Merkle root of `leaves`, taken in the given order.
///
/// - Empty input returns [`EMPTY_HASH`] (spec.md §4.2).
/// - Each leaf is first hashed on its own (`node.val = sha256_hex(leaf)`);
///   a singleton input therefore returns that single hash, matching "the
///   leaf's own hash" (spec.md §4.2).
/// - Internal nodes pair left-to-right: `node.val = sha256_hex(left.val +
///   right.val)`. An odd node out at any level is carried up unchanged
///   rather than duplicated or dropped (spec.md §4.2 "the source's natural
///   shape").
pub fn merkle_root(leaves: &[String]) -> String {
    if leaves.is_empty() {
        return EMPTY_HASH.to_string();
    }

    let mut level: Vec<String> = leaves.iter().map(sha256_hex).collect();

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for chunk in level.chunks(2) {
            match chunk {
                [left, right] => next.push(sha256_hex(format!("{left}{right}"))),
                [carried] => next.push(carried.clone()),
                _ => unreachable!("chunks(2) never yields more than two items"),
            }
        }
        level = next;
    }

    level.remove(0)
}

/// Build the `txRoot` leaf form: each transaction paired with its ordinal
/// index so that reordering transactions changes the root (spec.md §4.2,
/// §4.6). `canonical_tx_strings` must already be in submission order.
pub fn merkle_root_indexed(canonical_tx_strings: &[String]) -> String {
    let leaves: Vec<String> = canonical_tx_strings
        .iter()
        .enumerate()
        .map(|(index, tx)| format!("{index}{tx}"))
        .collect();
    merkle_root(&leaves)
}
