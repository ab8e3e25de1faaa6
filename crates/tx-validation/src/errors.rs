//! The eight named rejection kinds (spec.md §7), carried as a typed enum
//! internally and collapsed to a plain `bool` at every public boundary —
//! the boolean contract itself is never widened.

use chain_storage::StorageError;
use thiserror::Error;

/// Why a transaction or block was rejected. Never returned to callers of
/// `verify_and_transit`/`is_valid`/etc. directly; logged via `tracing::warn!`
/// and then folded into `false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// ECDSA recovery failed, or the recovered signer is not who the
    /// transaction claims.
    #[error("invalid signature")]
    InvalidSignature,

    /// The sender's balance cannot cover `amount + gas + contractGas`, or
    /// went negative during replay.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The sender address has no account in `stateDB`.
    #[error("unknown sender")]
    UnknownSender,

    /// A contract account (`codeHash != EMPTY_HASH`) attempted to originate
    /// a transaction (spec.md §3 invariant 3, §4.5 step 4a).
    #[error("contract account cannot send")]
    ContractCannotSend,

    /// A sender's nonce sequence within the block has a gap or is out of
    /// order (spec.md §4.6 `hasValidTxOrder`).
    #[error("bad nonce")]
    BadNonce,

    /// `Σ contractGas` across the block exceeds `BLOCK_GAS_LIMIT`
    /// (spec.md §4.6 `hasValidGasLimit`).
    #[error("gas limit exceeded")]
    GasLimitExceeded,

    /// The block failed `hasValidPropTypes` or another structural shape
    /// check before any cryptography was attempted.
    #[error("malformed block")]
    MalformedBlock,

    /// The contract runtime reported a failure while executing a call
    /// (spec.md §4.7).
    #[error("runtime error")]
    RuntimeError,
}

/// Either a normal rejection (non-fatal, the block is simply invalid) or a
/// persistent-store fault (fatal, must propagate and abort validation
/// without partial commit — spec.md §7). Keeping these in one enum lets
/// validation helpers use `?` for the fatal case while still returning the
/// rejection reason on the non-fatal one.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The transaction or block is invalid; not a fault of any store.
    #[error(transparent)]
    Rejected(#[from] RejectionReason),

    /// The store could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
