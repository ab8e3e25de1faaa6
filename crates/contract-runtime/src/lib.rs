//! # Contract Runtime
//!
//! The Contract Runtime Adapter (spec.md §4.7): a thin, swappable facade in
//! front of whatever interpreter actually executes contract source. Its
//! contract is an I/O shape, not a virtual machine — the interpreter's
//! internal opcode semantics are explicitly out of scope (spec.md §1) and
//! owned by whatever embedding application supplies a real one.
//!
//! `state-transition` depends only on [`ContractExecutor`]; [`ScriptInterpreter`]
//! exists so this crate has something runnable to test against and so the
//! workspace's integration tests can exercise contract deployment and calls
//! end to end.

pub mod errors;
pub mod ports;
pub mod script;

pub use errors::RuntimeError;
pub use ports::{ContractExecutor, ContractInfo, StatesOverlay, StorageOverlay};
pub use script::ScriptInterpreter;
