//! End-to-end scenarios from spec.md §8, run through the full caller
//! pipeline (`Fixture::accept_block`): prop-type, gas-limit, and
//! nonce-order pre-checks, then `verify_and_transit`.

use chain_engine_tests::{addr, block_with, Fixture, Signer};
use chain_types::{AdditionalData, BigAmount};

/// S1 — plain transfer.
#[tokio::test]
async fn s1_plain_transfer() {
    let fixture = Fixture::new();
    let a = Signer::new();
    fixture.seed(&a.address, 100).await;

    let b = addr('b');
    let coinbase = addr('c');
    let tx = a.sign_tx(b.clone(), "10", "1", 1, AdditionalData::default());
    let block = block_with(coinbase.clone(), vec![tx]);

    assert!(fixture.accept_block(&block).await);

    let sender_after = fixture.account(&a.address).await.unwrap();
    assert_eq!(sender_after.balance.to_decimal_string(), "89");
    assert_eq!(sender_after.nonce, 1);

    let recipient_after = fixture.account(&b).await.unwrap();
    assert_eq!(recipient_after.balance.to_decimal_string(), "10");

    let coinbase_after = fixture.account(&coinbase).await.unwrap();
    assert_eq!(
        coinbase_after.balance,
        &fixture.config.block_reward + &BigAmount::from_u64(1)
    );
}

/// S2 — insufficient funds: reject, stores unchanged.
#[tokio::test]
async fn s2_insufficient_funds() {
    let fixture = Fixture::new();
    let a = Signer::new();
    fixture.seed(&a.address, 100).await;

    let tx = a.sign_tx(addr('b'), "200", "1", 1, AdditionalData::default());
    let block = block_with(addr('c'), vec![tx]);

    assert!(!fixture.accept_block(&block).await);

    let sender_after = fixture.account(&a.address).await.unwrap();
    assert_eq!(sender_after.balance.to_decimal_string(), "100");
    assert_eq!(sender_after.nonce, 0);
    assert!(fixture.account(&addr('b')).await.is_none());
}

/// S3 — bad nonce: `has_valid_tx_order` rejects before the engine runs.
#[tokio::test]
async fn s3_bad_nonce() {
    let fixture = Fixture::new();
    let a = Signer::new();
    fixture.seed(&a.address, 100).await;

    let tx = a.sign_tx(addr('b'), "10", "1", 2, AdditionalData::default());
    let block = block_with(addr('c'), vec![tx]);

    assert!(!tx_validation::has_valid_tx_order(&block, &fixture.state_db)
        .await
        .unwrap());
    assert!(!fixture.accept_block(&block).await);
}

/// S4 — contract deployment: a sends to itself with `scBody`, then cannot
/// send again.
#[tokio::test]
async fn s4_contract_deployment() {
    let fixture = Fixture::new();
    let a = Signer::new();
    fixture.seed(&a.address, 1_000).await;

    let code_body = "SET greeting hello";
    let deploy = a.sign_tx(
        a.address.clone(),
        "0",
        "1",
        1,
        AdditionalData {
            contract_gas: None,
            sc_body: Some(code_body.to_string()),
        },
    );
    let block = block_with(addr('c'), vec![deploy]);
    assert!(fixture.accept_block(&block).await);

    let account = fixture.account(&a.address).await.unwrap();
    assert_eq!(account.code_hash, chain_crypto::sha256_hex(code_body));

    // A second transaction from the now-contract account must be rejected.
    let second = a.sign_tx(addr('d'), "1", "1", 2, AdditionalData::default());
    let next_block = block_with(addr('c'), vec![second]);
    assert!(!fixture.accept_block(&next_block).await);
}

/// S5 — contract call: runtime invoked, storageRoot reflects the returned
/// storage map.
#[tokio::test]
async fn s5_contract_call() {
    let fixture = Fixture::new();
    let a = Signer::new();
    fixture.seed(&a.address, 1_000).await;

    let d = addr('d');
    let code_body = "SET balance 10\nADD balance 5\n";
    fixture.seed_contract(&d, 0, code_body).await;

    let tx = a.sign_tx(
        d.clone(),
        "5",
        "1",
        1,
        AdditionalData {
            contract_gas: Some(BigAmount::from_u64(1_000)),
            sc_body: None,
        },
    );
    let block = block_with(addr('c'), vec![tx]);
    assert!(fixture.accept_block(&block).await);

    let contract_after = fixture.account(&d).await.unwrap();
    assert_eq!(contract_after.balance.to_decimal_string(), "5");
    let expected_root = chain_crypto::merkle_root(&["balance 15".to_string()]);
    assert_eq!(contract_after.storage_root, expected_root);
}

/// S6 — gas-limit violation.
#[tokio::test]
async fn s6_gas_limit_violation() {
    let fixture = Fixture::new();
    let a = Signer::new();
    fixture.seed(&a.address, 1_000).await;

    let over_limit = &fixture.config.block_gas_limit + &BigAmount::from_u64(1);
    let tx = a.sign_tx(
        addr('b'),
        "1",
        "1",
        1,
        AdditionalData {
            contract_gas: Some(over_limit),
            sc_body: None,
        },
    );
    let block = block_with(addr('c'), vec![tx]);

    assert!(!tx_validation::has_valid_gas_limit(&block, &fixture.config));
    assert!(!fixture.accept_block(&block).await);
}

/// §8 round-trip: accepting the same block twice rejects the second time
/// (the nonce-order pre-check catches the replay).
#[tokio::test]
async fn replaying_an_accepted_block_is_rejected() {
    let fixture = Fixture::new();
    let a = Signer::new();
    fixture.seed(&a.address, 100).await;

    let tx = a.sign_tx(addr('b'), "10", "1", 1, AdditionalData::default());
    let block = block_with(addr('c'), vec![tx]);

    assert!(fixture.accept_block(&block).await);
    assert!(!fixture.accept_block(&block).await);
}

/// §8 invariant 4 (no commutativity assumption): transactions are replayed
/// strictly in block order, never re-sorted or batched by sender. A
/// contract invoked twice in the same block, once per sending transaction,
/// sees the `states` overlay exactly as the earlier transactions in the
/// block left it - this is what makes later-positioned invocations able to
/// observe earlier ones at all, rather than each seeing an independent
/// snapshot of the pre-block store.
#[tokio::test]
async fn a_later_invocation_observes_an_earlier_transactions_transfer() {
    let a = Signer::new();
    let b = Signer::new();
    let d = addr('d');
    let e = addr('e');
    let code_body = format!("TRANSFER {e} 4\n");

    let fixture = Fixture::new();
    fixture.seed(&a.address, 100).await;
    fixture.seed(&b.address, 100).await;
    fixture.seed_contract(&d, 10, &code_body).await;

    // a's transaction invokes d first, moving 4 of d's balance to e. b's
    // transaction invokes d second, observing d's balance as a's call left
    // it (6, not the original 10) before moving another 4 out.
    let tx_a = a.sign_tx(
        d.clone(),
        "0",
        "1",
        1,
        AdditionalData {
            contract_gas: Some(BigAmount::from_u64(10)),
            sc_body: None,
        },
    );
    let tx_b = b.sign_tx(
        d.clone(),
        "0",
        "1",
        1,
        AdditionalData {
            contract_gas: Some(BigAmount::from_u64(10)),
            sc_body: None,
        },
    );
    let block = block_with(addr('c'), vec![tx_a, tx_b]);
    assert!(fixture.accept_block(&block).await);

    let d_after = fixture.account(&d).await.unwrap();
    assert_eq!(d_after.balance.to_decimal_string(), "2");
    let e_after = fixture.account(&e).await.unwrap();
    assert_eq!(e_after.balance.to_decimal_string(), "8");
}

/// §8 invariant 7 (atomicity): a rejected block that also fails partway
/// through replay leaves the stores exactly as they were.
#[tokio::test]
async fn atomicity_on_mid_block_rejection() {
    let fixture = Fixture::new();
    let a = Signer::new();
    let b = Signer::new();
    fixture.seed(&a.address, 100).await;
    fixture.seed(&b.address, 5).await;

    // a's transfer succeeds on its own; b's does not have enough for
    // amount + gas. The whole block must be rejected and a's balance must
    // remain untouched even though its transaction was replayed first.
    let tx_a = a.sign_tx(addr('x'), "50", "1", 1, AdditionalData::default());
    let tx_b = b.sign_tx(addr('y'), "100", "1", 1, AdditionalData::default());
    let block = block_with(addr('c'), vec![tx_a, tx_b]);

    assert!(!fixture.accept_block(&block).await);

    let a_after = fixture.account(&a.address).await.unwrap();
    assert_eq!(a_after.balance.to_decimal_string(), "100");
    assert_eq!(a_after.nonce, 0);
    assert!(fixture.account(&addr('x')).await.is_none());
}
