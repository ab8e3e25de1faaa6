//! Persistence-layer error type.

use thiserror::Error;

/// Errors raised by a [`crate::KvStore`] or [`crate::AccountStorage`]
/// adapter. These are fatal to the in-progress block per spec.md §7 ("a
/// store that cannot be read or written is an engine fault, not a
/// rejection") and must propagate through `?`, never collapse to `false`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying store returned an I/O or backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A value existed under the key but could not be decoded.
    #[error("corrupt record at key {key}: {reason}")]
    Corrupt {
        /// Hex-encoded key under which the undecodable value was found.
        key: String,
        /// Decoder's failure message.
        reason: String,
    },

    /// An account's storage was accessed without first calling `open`, or
    /// was accessed again after `close`.
    #[error("account storage for {address} is not open")]
    NotOpen {
        /// The address whose storage handle was missing or already closed.
        address: String,
    },

    /// `open` was called for an account whose storage another caller
    /// already holds open (the per-block exclusivity rule, spec.md §5).
    #[error("account storage for {address} is already open")]
    AlreadyOpen {
        /// The address whose storage is locked by another handle.
        address: String,
    },
}
