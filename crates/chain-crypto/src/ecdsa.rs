//! secp256k1 recoverable ECDSA: signing, public-key recovery, and address
//! derivation (spec.md §4.3).
//!
//! Adapted from the reference signature-verification subsystem's
//! recoverable-ECDSA pattern, but with this spec's own addressing
//! convention: `Address(tx) = sha256_hex(pubkey_hex)` where `pubkey_hex` is
//! the uncompressed public key's hex encoding — not Keccak256 over the raw
//! bytes, and not truncated to 20 bytes.

use crate::errors::CryptoError;
use crate::hashing::sha256_hex;
use chain_types::{Address, RecoverableSignature};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

/// Sign a 32-byte message digest, returning a recoverable signature.
///
/// Used by test fixtures and tooling to build signed transactions; the
/// engine itself only ever verifies and recovers, never signs.
pub fn sign_prehash(signing_key: &SigningKey, message_hash: &[u8; 32]) -> RecoverableSignature {
    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash_recoverable(message_hash)
        .expect("signing a 32-byte prehash with a valid key cannot fail");
    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    RecoverableSignature {
        r,
        s,
        recovery_id: recovery_id.to_byte(),
    }
}

/// Recover the signer's public key from a message digest and signature
/// (spec.md §4.3 `get_pub_key`).
pub fn recover_public_key(
    message_hash: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<VerifyingKey, CryptoError> {
    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let sig = Signature::from_slice(&sig_bytes).map_err(|_| CryptoError::MalformedSignature)?;
    let recovery_id =
        RecoveryId::from_byte(signature.recovery_id).ok_or(CryptoError::MalformedSignature)?;

    VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)
}

/// Derive the hex-string form of an uncompressed public key
/// (spec.md §4.3 `pubkey_hex`).
pub fn public_key_hex(public_key: &VerifyingKey) -> String {
    hex::encode(public_key.to_encoded_point(false).as_bytes())
}

/// `Address(tx) = sha256_hex(pubkey_hex)` (spec.md §4.3).
pub fn address_from_public_key(public_key: &VerifyingKey) -> Address {
    let digest = sha256_hex(public_key_hex(public_key).as_bytes());
    Address::new(digest).expect("sha256_hex always produces 64 lowercase hex characters")
}

/// Recover the sender's address directly from a message digest and
/// signature: `sha256_hex(get_pub_key(tx))` (spec.md §4.3).
pub fn recover_address(
    message_hash: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<Address, CryptoError> {
    recover_public_key(message_hash, signature).map(|pk| address_from_public_key(&pk))
}
