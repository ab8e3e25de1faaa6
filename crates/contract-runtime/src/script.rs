//! `ScriptInterpreter`: a minimal deterministic line-oriented language used
//! as the reference [`ContractExecutor`] (spec.md §4.7). The interpreter's
//! own opcode semantics are not part of the specification this crate
//! implements — this is only a runnable stand-in behind the trait.
//!
//! Grammar, one instruction per line, blank lines ignored:
//!
//! ```text
//! SET <key> <value>
//! ADD <key> <value>
//! TRANSFER <address> <amount>
//! ```
//!
//! `SET`/`ADD` touch the invoked contract's own storage view; `TRANSFER`
//! moves balance from the contract's own account to another in the states
//! overlay, creating the recipient as a fresh EOA if it does not yet exist.
//! Every instruction costs exactly one gas unit.

use async_trait::async_trait;
use chain_storage::KvStore;
use chain_types::{AccountState, Address, BigAmount, Block, Transaction};

use crate::errors::RuntimeError;
use crate::ports::{ContractExecutor, ContractInfo, StatesOverlay, StorageOverlay};

/// The reference [`ContractExecutor`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptInterpreter;

async fn resolve_account(
    states: &StatesOverlay,
    state_db: &dyn KvStore,
    address: &Address,
) -> Result<AccountState, RuntimeError> {
    if let Some(account) = states.get(address) {
        return Ok(account.clone());
    }
    let key = address.as_str().as_bytes().to_vec();
    match state_db.get(&key).await? {
        Some(bytes) => bincode::deserialize(&bytes).map_err(|err| {
            RuntimeError::MalformedInstruction(format!(
                "stateDB entry for {address} did not decode: {err}"
            ))
        }),
        None => Ok(AccountState::fresh()),
    }
}

#[async_trait]
impl ContractExecutor for ScriptInterpreter {
    async fn run(
        &self,
        code: &str,
        states_overlay: &StatesOverlay,
        gas_budget: &BigAmount,
        state_db: &dyn KvStore,
        _block: &Block,
        _tx: &Transaction,
        contract_info: &ContractInfo,
    ) -> Result<(StatesOverlay, StorageOverlay), RuntimeError> {
        let mut states = states_overlay.clone();
        let mut storage = StorageOverlay::new();
        let mut contract = resolve_account(states_overlay, state_db, &contract_info.address).await?;
        let mut consumed: u64 = 0;

        for line in code.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            consumed += 1;
            if BigAmount::from_u64(consumed) > *gas_budget {
                tracing::debug!(address = %contract_info.address, "gas budget exhausted, halting cleanly");
                break;
            }

            let mut parts = line.split_whitespace();
            let op = parts
                .next()
                .ok_or_else(|| RuntimeError::MalformedInstruction(line.to_string()))?;

            match op {
                "SET" => {
                    let key = parts
                        .next()
                        .ok_or_else(|| RuntimeError::MalformedInstruction(line.to_string()))?;
                    let value = parts
                        .next()
                        .ok_or_else(|| RuntimeError::MalformedInstruction(line.to_string()))?;
                    storage.insert(key.to_string(), value.to_string());
                }
                "ADD" => {
                    let key = parts
                        .next()
                        .ok_or_else(|| RuntimeError::MalformedInstruction(line.to_string()))?;
                    let delta_str = parts
                        .next()
                        .ok_or_else(|| RuntimeError::MalformedInstruction(line.to_string()))?;
                    let delta = BigAmount::parse(delta_str)
                        .map_err(|_| RuntimeError::BadAmount(delta_str.to_string()))?;
                    let current = storage
                        .get(key)
                        .map(|value| BigAmount::parse(value))
                        .transpose()
                        .map_err(|_| RuntimeError::BadAmount(key.to_string()))?
                        .unwrap_or_else(BigAmount::zero);
                    storage.insert(key.to_string(), (&current + &delta).to_decimal_string());
                }
                "TRANSFER" => {
                    let address_str = parts
                        .next()
                        .ok_or_else(|| RuntimeError::MalformedInstruction(line.to_string()))?;
                    let amount_str = parts
                        .next()
                        .ok_or_else(|| RuntimeError::MalformedInstruction(line.to_string()))?;
                    let address = Address::new(address_str)
                        .map_err(|_| RuntimeError::BadAddress(address_str.to_string()))?;
                    let amount = BigAmount::parse(amount_str)
                        .map_err(|_| RuntimeError::BadAmount(amount_str.to_string()))?;

                    contract.balance = &contract.balance - &amount;
                    let mut recipient = resolve_account(&states, state_db, &address).await?;
                    recipient.balance = &recipient.balance + &amount;
                    states.insert(address, recipient);
                }
                other => {
                    return Err(RuntimeError::MalformedInstruction(format!(
                        "unknown instruction {other}"
                    )));
                }
            }
        }

        states.insert(contract_info.address.clone(), contract);
        Ok((states, storage))
    }
}
