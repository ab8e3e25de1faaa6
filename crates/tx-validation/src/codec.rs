//! Transaction Codec & Signer (spec.md §4.3): canonical encoding, signer
//! recovery, and the `is_valid` structural/signature/balance check.

use chain_crypto::{ecdsa, sha256_bytes};
use chain_storage::KvStore;
use chain_types::{Address, BigAmount, ChainConfig, Transaction};

use crate::errors::{RejectionReason, ValidationError};
use crate::records;

/// Deterministic concatenation of a transaction's signed fields, in the
/// fixed order `recipient, amount, gas, additionalData, nonce` (spec.md
/// §4.3). No field separator: the Hasher introduces none, so none may be
/// implied here either, or a shifted boundary between two fields could
/// produce the same string for two different transactions.
pub fn canonical_tx_string(tx: &Transaction) -> String {
    let contract_gas = tx
        .additional_data
        .contract_gas
        .as_ref()
        .map(BigAmount::to_decimal_string)
        .unwrap_or_default();
    let sc_body = tx.additional_data.sc_body.as_deref().unwrap_or_default();
    format!(
        "{}{}{}{}{}{}",
        tx.recipient.as_str(),
        tx.amount.to_decimal_string(),
        tx.gas.to_decimal_string(),
        contract_gas,
        sc_body,
        tx.nonce,
    )
}

/// The 32-byte message digest a transaction's signature is taken over:
/// `sha256(canonical_tx_string(tx))`.
pub fn message_hash(tx: &Transaction) -> [u8; 32] {
    sha256_bytes(canonical_tx_string(tx))
}

/// Recover the sender's address from a transaction's signature: spec.md
/// §4.3's `Address(tx) = sha256_hex(get_pub_key(tx))`.
pub fn recover_sender(tx: &Transaction) -> Result<Address, RejectionReason> {
    ecdsa::recover_address(&message_hash(tx), &tx.signature).map_err(|err| {
        tracing::warn!(error = %err, "signature recovery failed");
        RejectionReason::InvalidSignature
    })
}

/// `is_valid(tx, stateDB)` (spec.md §4.3): signature recovers, `amount >=
/// 0`, `gas >= minimum_tx_gas`, the sender exists, and the sender can
/// afford `amount + gas + contractGas`. Returns the recovered sender on
/// success so callers (the engine's step 1/2) never recover it twice.
pub async fn is_valid(
    tx: &Transaction,
    state_db: &dyn KvStore,
    config: &ChainConfig,
) -> Result<Address, ValidationError> {
    let sender = recover_sender(tx)?;

    if tx.amount.is_negative() {
        tracing::warn!(%sender, "transaction amount is negative");
        return Err(RejectionReason::MalformedBlock.into());
    }
    if tx.gas < config.minimum_tx_gas {
        tracing::warn!(%sender, "transaction gas below minimum_tx_gas");
        return Err(RejectionReason::MalformedBlock.into());
    }

    let account = records::load_account(state_db, &sender).await?;
    let Some(account) = account else {
        tracing::warn!(%sender, "sender has no account in stateDB");
        return Err(RejectionReason::UnknownSender.into());
    };

    let required = &(&tx.amount + &tx.gas)
        + &tx
            .additional_data
            .contract_gas
            .clone()
            .unwrap_or_else(BigAmount::zero);
    if account.balance < required {
        tracing::warn!(%sender, "sender balance insufficient for amount + gas + contractGas");
        return Err(RejectionReason::InsufficientBalance.into());
    }

    Ok(sender)
}
