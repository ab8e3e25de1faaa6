//! Error types for malformed domain values.
//!
//! These are construction-time errors only (bad hex, wrong length, negative
//! balance at the type boundary). Block-acceptance rejection reasons live in
//! `tx-validation` and `state-transition`, per spec.md §7: this crate never
//! decides whether a block is valid, only whether a value is well-formed.

use thiserror::Error;

/// Errors raised while constructing a domain type from raw input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// An address or hash string was not exactly 64 hex characters.
    #[error("expected 64 hex characters, got {len} ({value:?})")]
    WrongHexLength { len: usize, value: String },

    /// A string contained non-hex characters where hex was required.
    #[error("not valid hex: {0:?}")]
    NotHex(String),

    /// A decimal string did not parse as a non-negative integer.
    #[error("not a valid non-negative decimal integer: {0:?}")]
    NotNonNegativeDecimal(String),

    /// A decimal string did not parse as an integer at all.
    #[error("not a valid decimal integer: {0:?}")]
    NotDecimal(String),
}
