//! Cryptographic error types.

use thiserror::Error;

/// Errors raised by signing, verification, or public-key recovery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature's `r`/`s`/recovery-id bytes did not parse as a valid
    /// secp256k1 signature.
    #[error("malformed signature")]
    MalformedSignature,

    /// Public-key recovery failed (no curve point corresponds to the
    /// supplied `(r, s, recovery_id, message_hash)` tuple).
    #[error("public key recovery failed")]
    RecoveryFailed,
}
