//! The State Transition Engine (spec.md §4.5): `verify_and_transit`.
//!
//! This is the 40%-of-budget core the rest of the workspace exists to
//! support. It is all-or-nothing: every mutation is staged in the local
//! `states`/`code`/`storage` overlays and only flushed to the persistent
//! stores after every check in steps 1-5 has passed (spec.md §5's
//! stage-in-memory, commit-at-end discipline). A `false` return therefore
//! never touches `stateDB`, `codeDB`, or any account's storage database.

use std::collections::{HashMap, HashSet};

use chain_crypto::{merkle_root, sha256_hex};
use chain_storage::{AccountStorage, KvStore};
use chain_types::{AccountState, Address, BigAmount, Block, ChainConfig, CodeEntry, EMPTY_HASH};
use contract_runtime::{ContractExecutor, ContractInfo, RuntimeError};
use tx_validation::ValidationError;

use crate::errors::EngineError;

/// Apply `block` to `state_db`/`code_db` if and only if every validation
/// check in spec.md §4.5 passes, committing the resulting world state and
/// returning `true`; otherwise leaves both stores untouched and returns
/// `false`. A store fault at any point is fatal and propagates as `Err`
/// (spec.md §7), not folded into the `false` verdict.
#[allow(clippy::too_many_arguments)]
pub async fn verify_and_transit(
    block: &Block,
    state_db: &dyn KvStore,
    code_db: &dyn KvStore,
    account_storage: &dyn AccountStorage,
    config: &ChainConfig,
    executor: &dyn ContractExecutor,
) -> Result<bool, EngineError> {
    // Step 1: per-transaction validation. `is_valid` already recovers the
    // sender, so its result is kept rather than recovered a second time.
    let mut senders = Vec::with_capacity(block.transactions.len());
    for tx in &block.transactions {
        match tx_validation::is_valid(tx, state_db, config).await {
            Ok(sender) => senders.push(sender),
            Err(ValidationError::Rejected(reason)) => {
                tracing::warn!(?reason, "block rejected during per-transaction validation");
                return Ok(false);
            }
            Err(ValidationError::Storage(err)) => return Err(err.into()),
        }
    }

    // Step 2: every sending address must already exist in stateDB. `is_valid`
    // enforces this per transaction already; this pass re-checks it as its
    // own step, matching spec.md §4.5's explicit separation of the two.
    let mut already_checked: HashSet<Address> = HashSet::with_capacity(senders.len());
    for sender in &senders {
        if already_checked.insert(sender.clone())
            && tx_validation::load_account(state_db, sender).await?.is_none()
        {
            tracing::warn!(%sender, "sender has no account in stateDB");
            return Ok(false);
        }
    }

    // Step 3: overlay initialization.
    let mut states: HashMap<Address, AccountState> = HashMap::new();
    let mut code: HashMap<String, String> = HashMap::new();
    let mut storage: HashMap<Address, HashMap<String, String>> = HashMap::new();

    // Step 4: ordered replay.
    for (tx, sender) in block.transactions.iter().zip(senders.iter()) {
        match states.get(sender) {
            None => {
                let account = tx_validation::load_account(state_db, sender)
                    .await?
                    .expect("steps 1 and 2 already confirmed this sender exists");
                // The code lookup happens before the contract check here,
                // matching the source's order (spec.md §9 open question);
                // harmless for an EOA since its codeHash is EMPTY_HASH.
                if let Some(entry) = tx_validation::load_code(code_db, &account.code_hash).await? {
                    code.insert(account.code_hash.clone(), entry.body);
                }
                if account.is_contract() {
                    tracing::warn!(%sender, "contract account cannot send");
                    return Ok(false);
                }
                states.insert(sender.clone(), account);
            }
            Some(account) if account.is_contract() => {
                // Enforced on every touch, not just first load (spec.md §9).
                tracing::warn!(%sender, "contract account cannot send");
                return Ok(false);
            }
            Some(_) => {}
        }

        let mut sender_account = states
            .get(sender)
            .expect("inserted above or already present")
            .clone();

        let contract_gas = tx
            .additional_data
            .contract_gas
            .clone()
            .unwrap_or_else(BigAmount::zero);

        // b. debit: amount + gas + contractGas, signed arithmetic.
        sender_account.balance = &(&sender_account.balance - &tx.amount) - &(&tx.gas + &contract_gas);

        // c. contract deployment binds to the sender's own address.
        if sender_account.code_hash == EMPTY_HASH {
            if let Some(sc_body) = &tx.additional_data.sc_body {
                let code_hash = sha256_hex(sc_body);
                code.insert(code_hash.clone(), sc_body.clone());
                sender_account.code_hash = code_hash;
            }
        }

        // d. nonce.
        sender_account.nonce += 1;

        states.insert(sender.clone(), sender_account.clone());

        // e. reject once the debit is known.
        if sender_account.balance.is_negative() {
            tracing::warn!(%sender, "sender balance went negative during replay");
            return Ok(false);
        }

        // f. resolve the recipient, loading its code too if it is already a
        // contract (needed for step h's invocation).
        if !states.contains_key(&tx.recipient) {
            let recipient = tx_validation::load_account(state_db, &tx.recipient)
                .await?
                .unwrap_or_else(AccountState::fresh);
            if recipient.is_contract() && !code.contains_key(&recipient.code_hash) {
                if let Some(entry) = tx_validation::load_code(code_db, &recipient.code_hash).await? {
                    code.insert(recipient.code_hash.clone(), entry.body);
                }
            }
            states.insert(tx.recipient.clone(), recipient);
        }

        // g. credit.
        let mut recipient_account = states
            .get(&tx.recipient)
            .expect("just resolved above")
            .clone();
        recipient_account.balance = &recipient_account.balance + &tx.amount;
        let recipient_is_contract = recipient_account.is_contract();
        states.insert(tx.recipient.clone(), recipient_account.clone());

        // h. invoke the contract runtime when the recipient has code.
        if recipient_is_contract {
            let Some(contract_code) = code.get(&recipient_account.code_hash).cloned() else {
                tracing::warn!(
                    recipient = %tx.recipient,
                    code_hash = %recipient_account.code_hash,
                    "recipient's codeHash has no matching entry in codeDB"
                );
                return Ok(false);
            };

            let contract_info = ContractInfo {
                address: tx.recipient.clone(),
            };

            let outcome = executor
                .run(
                    &contract_code,
                    &states,
                    &contract_gas,
                    state_db,
                    block,
                    tx,
                    &contract_info,
                )
                .await;

            let (new_states, new_storage) = match outcome {
                Ok(outcome) => outcome,
                Err(RuntimeError::Storage(err)) => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(error = %err, "contract runtime reported a failure");
                    return Ok(false);
                }
            };

            // Runtime-returned entries override the current overlay.
            for (address, account) in new_states {
                states.insert(address, account);
            }
            storage.insert(tx.recipient.clone(), new_storage);
        }
    }

    // Step 5: coinbase reward.
    let coinbase = &block.header.coinbase;
    if !states.contains_key(coinbase) {
        let account = tx_validation::load_account(state_db, coinbase)
            .await?
            .unwrap_or_else(AccountState::fresh);
        states.insert(coinbase.clone(), account);
    }
    let total_gas = block.transactions.iter().fold(BigAmount::zero(), |acc, tx| {
        let contract_gas = tx
            .additional_data
            .contract_gas
            .clone()
            .unwrap_or_else(BigAmount::zero);
        &(&acc + &tx.gas) + &contract_gas
    });
    let mut coinbase_account = states
        .get(coinbase)
        .expect("just resolved above")
        .clone();
    coinbase_account.balance = &coinbase_account.balance + &(&config.block_reward + &total_gas);
    states.insert(coinbase.clone(), coinbase_account);

    // Step 6: commit. Every touched contract's storage is written wholesale
    // and its storageRoot recomputed over sorted "key value" leaves
    // (spec.md §9's resolved deterministic-order open question), then every
    // account and its code is flushed to stateDB/codeDB.
    for (address, entries) in &storage {
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        let leaves: Vec<String> = keys.iter().map(|k| format!("{k} {}", entries[k])).collect();
        let root = merkle_root(&leaves);
        if let Some(account) = states.get_mut(address) {
            account.storage_root = root;
        }

        let mut handle = account_storage.open(address).await?;
        for key in &keys {
            handle.put(key, &entries[key]).await?;
        }
        handle.close().await?;
    }

    let mut account_writes = Vec::with_capacity(states.len());
    let mut code_writes = Vec::new();
    for (address, account) in &states {
        account_writes.push((
            tx_validation::account_key(address),
            tx_validation::encode_account(account),
        ));
        if account.code_hash != EMPTY_HASH {
            if let Some(body) = code.get(&account.code_hash) {
                code_writes.push((
                    tx_validation::code_key(&account.code_hash),
                    tx_validation::encode_code(&CodeEntry { body: body.clone() }),
                ));
            }
        }
    }
    state_db.put_batch(account_writes).await?;
    if !code_writes.is_empty() {
        code_db.put_batch(code_writes).await?;
    }

    Ok(true)
}
