//! Errors a [`ContractExecutor`](crate::ports::ContractExecutor) may raise.

use chain_storage::StorageError;
use thiserror::Error;

/// A genuine execution fault, distinct from exhausting `gas_budget` — spec.md
/// §4.7 requires the latter to be a clean halt, not a failure. Surfaces to
/// `state-transition` as `RejectionReason::RuntimeError`.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A line of contract source did not parse as a known instruction.
    #[error("malformed contract instruction: {0}")]
    MalformedInstruction(String),

    /// An operand that was expected to be an address is not a well-formed one.
    #[error("not a well-formed address: {0}")]
    BadAddress(String),

    /// An operand that was expected to be an amount did not parse as one.
    #[error("not a well-formed amount: {0}")]
    BadAmount(String),

    /// Reading `stateDB` for an account outside the overlay failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
