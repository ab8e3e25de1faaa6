//! # Chain Types
//!
//! Domain entities for the block-validating state-transition engine:
//! addresses, account state, code entries, transactions, blocks, and chain
//! configuration constants.
//!
//! Every other crate in this workspace depends on `chain-types` rather than
//! redefining these shapes; it is the single source of truth for the data
//! model.

pub mod account;
pub mod address;
pub mod amount;
pub mod block;
pub mod config;
pub mod errors;
pub mod transaction;

pub use account::{AccountState, CodeEntry};
pub use address::{Address, Digest};
pub use amount::BigAmount;
pub use block::{Block, BlockHeader};
pub use config::{ChainConfig, EMPTY_HASH};
pub use errors::TypeError;
pub use transaction::{AdditionalData, RecoverableSignature, Transaction};
