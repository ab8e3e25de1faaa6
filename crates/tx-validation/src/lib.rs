//! # Transaction Validation
//!
//! Transaction and block-level validation (spec.md §4.3, §4.4, §4.6):
//! canonical encoding and signer recovery, structural and balance checks on
//! a single transaction, block-header hashing and prop-type validation,
//! per-block nonce-order checking, and the block gas-limit check.
//!
//! `state-transition` composes these with [`contract-runtime`](../contract_runtime)
//! to run the full `verify_and_transit` algorithm; this crate never touches
//! `stateDB`/`codeDB` beyond reading the records it needs to decide a
//! verdict.

pub mod block;
pub mod codec;
pub mod errors;
pub mod gas;
pub mod order;
pub mod records;

pub use block::{block_hash, has_valid_prop_types};
pub use codec::{canonical_tx_string, is_valid, message_hash, recover_sender};
pub use errors::{RejectionReason, ValidationError};
pub use gas::has_valid_gas_limit;
pub use order::has_valid_tx_order;
pub use records::{account_key, code_key, encode_account, encode_code, load_account, load_code};
