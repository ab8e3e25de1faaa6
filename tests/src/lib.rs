//! Shared fixtures for the end-to-end scenarios in spec.md §8.
//!
//! Every other crate in the workspace tests its own component in isolation;
//! this crate wires all of them together (`chain-crypto` signing,
//! `tx-validation`'s checks, `contract-runtime`'s reference interpreter, and
//! `state-transition`'s engine) against in-memory stores, the way the
//! embedding application's block-acceptance pipeline would.

use chain_storage::{InMemoryAccountStorage, InMemoryKvStore};
use chain_types::{
    AccountState, AdditionalData, Address, BigAmount, Block, BlockHeader, ChainConfig,
    RecoverableSignature, Transaction,
};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

/// A signer plus the address it corresponds to, so tests don't repeat the
/// key-to-address derivation.
pub struct Signer {
    pub signing_key: SigningKey,
    pub address: Address,
}

impl Signer {
    /// Generate a fresh random secp256k1 signer.
    pub fn new() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        let address = chain_crypto::ecdsa::address_from_public_key(signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    /// Build and sign a transaction from this signer.
    pub fn sign_tx(
        &self,
        recipient: Address,
        amount: &str,
        gas: &str,
        nonce: u64,
        additional_data: AdditionalData,
    ) -> Transaction {
        let mut tx = Transaction {
            recipient,
            amount: BigAmount::parse(amount).unwrap(),
            gas: BigAmount::parse(gas).unwrap(),
            nonce,
            additional_data,
            signature: RecoverableSignature {
                r: [0; 32],
                s: [0; 32],
                recovery_id: 0,
            },
        };
        let digest = tx_validation::message_hash(&tx);
        tx.signature = chain_crypto::ecdsa::sign_prehash(&self.signing_key, &digest);
        tx
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::new()
    }
}

/// A 64-hex address built from a single repeated character, for addresses
/// that don't need a real keypair (recipients, coinbases).
pub fn addr(hex_char: char) -> Address {
    Address::new(hex_char.to_string().repeat(64)).unwrap()
}

/// A block header wrapping `transactions` under `coinbase`, with a
/// placeholder `txRoot`/`hash` — the engine itself never recomputes or
/// checks these (that is `tx-validation::block`'s job, exercised
/// separately), so scenario tests that only exercise `verify_and_transit`
/// don't need a genuine Merkle root here.
pub fn block_with(coinbase: Address, transactions: Vec<Transaction>) -> Block {
    Block {
        header: BlockHeader {
            block_number: 1,
            timestamp: 1_700_000_000,
            difficulty: 1,
            parent_hash: "0".repeat(64),
            nonce: 0,
            tx_root: "0".repeat(64),
            coinbase,
            hash: "0".repeat(64),
        },
        transactions,
    }
}

/// Everything a scenario test needs: two empty ordered stores, an
/// account-storage adapter, the default chain config, and the reference
/// contract interpreter.
pub struct Fixture {
    pub state_db: InMemoryKvStore,
    pub code_db: InMemoryKvStore,
    pub account_storage: InMemoryAccountStorage,
    pub config: ChainConfig,
    pub executor: contract_runtime::ScriptInterpreter,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            state_db: InMemoryKvStore::new(),
            code_db: InMemoryKvStore::new(),
            account_storage: InMemoryAccountStorage::new(),
            config: ChainConfig::default(),
            executor: contract_runtime::ScriptInterpreter,
        }
    }

    /// Seed `address` with a fresh account carrying `balance` and otherwise
    /// default (zero nonce, no code, empty storage).
    pub async fn seed(&self, address: &Address, balance: u64) {
        let mut account = AccountState::fresh();
        account.balance = BigAmount::from_u64(balance);
        self.state_db
            .put(
                &tx_validation::account_key(address),
                &tx_validation::encode_account(&account),
            )
            .await
            .unwrap();
    }

    /// Seed a contract account with `code_hash` and register its source
    /// body in `code_db` under that hash.
    pub async fn seed_contract(&self, address: &Address, balance: u64, code_body: &str) {
        let code_hash = chain_crypto::sha256_hex(code_body);
        let mut account = AccountState::fresh();
        account.balance = BigAmount::from_u64(balance);
        account.code_hash = code_hash.clone();
        self.state_db
            .put(
                &tx_validation::account_key(address),
                &tx_validation::encode_account(&account),
            )
            .await
            .unwrap();
        self.code_db
            .put(
                &tx_validation::code_key(&code_hash),
                &tx_validation::encode_code(&chain_types::CodeEntry {
                    body: code_body.to_string(),
                }),
            )
            .await
            .unwrap();
    }

    pub async fn account(&self, address: &Address) -> Option<AccountState> {
        tx_validation::load_account(&self.state_db, address)
            .await
            .unwrap()
    }

    /// Run the full caller-side pipeline spec.md §6 describes: the block
    /// acceptance checks a collaborator is expected to invoke before
    /// `verify_and_transit`, then the engine itself.
    pub async fn accept_block(&self, block: &Block) -> bool {
        if !tx_validation::has_valid_prop_types(block) {
            return false;
        }
        if !tx_validation::has_valid_gas_limit(block, &self.config) {
            return false;
        }
        if !tx_validation::has_valid_tx_order(block, &self.state_db)
            .await
            .unwrap()
        {
            return false;
        }
        state_transition::verify_and_transit(
            block,
            &self.state_db,
            &self.code_db,
            &self.account_storage,
            &self.config,
            &self.executor,
        )
        .await
        .unwrap()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
