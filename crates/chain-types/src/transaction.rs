//! Transactions (spec.md §3).

use crate::address::Address;
use crate::amount::BigAmount;
use serde::{Deserialize, Serialize};

/// The recoverable-ECDSA signature components carried on the wire.
///
/// Kept as raw fixed-size byte arrays here (rather than a `k256` type) so
/// `chain-types` has no cryptography dependency beyond hashing; recovery and
/// verification live in `chain-crypto`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverableSignature {
    /// The `r` component of the ECDSA signature.
    pub r: [u8; 32],
    /// The `s` component of the ECDSA signature.
    pub s: [u8; 32],
    /// The recovery id (0 or 1) needed to recover the public key from
    /// `(r, s)` and the message digest.
    pub recovery_id: u8,
}

/// The optional contract-deployment / contract-call fields of a transaction
/// (spec.md §3 `additionalData`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalData {
    /// Gas budget passed to the contract runtime when the recipient is a
    /// contract (spec.md §4.5 step 4h).
    pub contract_gas: Option<BigAmount>,
    /// Contract source text; when present and the sender has no code yet,
    /// this transaction deploys a contract bound to the sender's own
    /// address (spec.md §4.5 step 4c).
    pub sc_body: Option<String>,
}

/// A transaction (spec.md §3).
///
/// The sender is not a field: it is recovered from the signature via
/// `chain-crypto::ecdsa::recover_address` (spec.md §4.3).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Recipient of `amount` (and, if it has contract code, the target of
    /// contract invocation).
    pub recipient: Address,
    /// Value transferred from sender to recipient.
    pub amount: BigAmount,
    /// Base gas fee, paid to the coinbase regardless of contract execution.
    pub gas: BigAmount,
    /// Sender-scoped, strictly increasing transaction counter
    /// (spec.md §4.6 `hasValidTxOrder`).
    pub nonce: u64,
    /// Contract deployment / invocation fields.
    pub additional_data: AdditionalData,
    /// Recoverable ECDSA signature over the canonical transaction encoding
    /// (spec.md §4.3).
    pub signature: RecoverableSignature,
}
