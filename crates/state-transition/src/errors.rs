//! Engine-level fault type (spec.md §7).
//!
//! `verify_and_transit`'s public contract is a plain `bool`: a rejected
//! block and an accepted one are both `Ok`. Only a fault in a persistent
//! store — I/O failure, corruption — escapes as `Err`, and must abort the
//! call without any partial commit (spec.md §5, §7).

use chain_storage::StorageError;
use thiserror::Error;

/// A fatal fault encountered while validating or committing a block.
///
/// Never constructed for an ordinary rejection (insufficient balance, bad
/// signature, gas-limit overrun, ...): those collapse to `Ok(false)`, per
/// the boolean contract this type deliberately does not widen.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A read or write against `stateDB`, `codeDB`, or an account's storage
    /// database failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
