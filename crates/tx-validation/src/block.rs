//! Block Structure & Hasher (spec.md §4.4).

use chain_types::{Block, BlockHeader, Digest};

/// `getHash(block)` (spec.md §3 invariant 7): `SHA256(blockNumber ||
/// timestamp || txRoot || difficulty || parentHash || nonce)`, integer
/// fields base-10 decimal, string fields literal.
pub fn block_hash(header: &BlockHeader) -> String {
    let block_number = header.block_number.to_string();
    let timestamp = header.timestamp.to_string();
    let difficulty = header.difficulty.to_string();
    let nonce = header.nonce.to_string();

    chain_crypto::sha256_hex_concat(&[
        block_number.as_bytes(),
        timestamp.as_bytes(),
        header.tx_root.as_bytes(),
        difficulty.as_bytes(),
        header.parent_hash.as_bytes(),
        nonce.as_bytes(),
    ])
}

/// `hasValidPropTypes(block)` (spec.md §4.4): a pre-filter before any
/// cryptography is attempted. Numeric and sequence shape are already
/// enforced by the type system at deserialization time; what remains is
/// checking that the hash-shaped string fields are genuine 64-hex digests,
/// not just arbitrary strings.
pub fn has_valid_prop_types(block: &Block) -> bool {
    Digest::new(block.header.parent_hash.clone()).is_ok()
        && Digest::new(block.header.tx_root.clone()).is_ok()
        && Digest::new(block.header.hash.clone()).is_ok()
}
