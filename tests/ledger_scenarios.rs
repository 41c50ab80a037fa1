//! Ledger walkthrough through the public API
//!
//! Runs one ledger through a fresh start, a successful transfer, both kinds of
//! rejected call and two further credits to the same receiver, checking the
//! counters, balances and history after every step. A second test watches the
//! emitted events from a subscriber while several tasks write concurrently.

use std::sync::Arc;
use transfer_ledger::core::{BroadcastSink, FixedClock, ManualClock, Wallets};
use transfer_ledger::{
    AccountId, LedgerError, SharedLedger, TransferLedger, TransferRecord, TransferRequest,
};

#[test]
fn test_ledger_walkthrough() {
    let clock = Arc::new(ManualClock::new(1_000));
    let mut ledger = TransferLedger::new().with_clock(Arc::clone(&clock));
    let a = AccountId::from("A");
    let b = AccountId::from("B");

    // fresh ledger
    assert_eq!(ledger.count_transfers(), 0);
    assert!(ledger.list_transfers().is_empty());

    // first transfer
    let first = ledger
        .record_transfer(&a, TransferRequest::new("B", 100, "hi", "greeting"), 100)
        .unwrap();
    assert_eq!(ledger.count_transfers(), 1);
    assert_eq!(ledger.balance_of(&b), 100);
    assert_eq!(
        ledger.list_transfers()[0],
        TransferRecord {
            sender: a.clone(),
            receiver: b.clone(),
            amount: 100,
            message: "hi".to_string(),
            keyword: "greeting".to_string(),
            timestamp: 1_000,
        }
    );
    assert_eq!(first, ledger.list_transfers()[0]);

    // zero amount
    let result = ledger.record_transfer(&a, TransferRequest::new("B", 0, "x", "y"), 0);
    assert_eq!(result, Err(LedgerError::InvalidAmount { amount: 0 }));
    assert_eq!(ledger.count_transfers(), 1);

    // attached value missing
    let result = ledger.record_transfer(&a, TransferRequest::new("B", 50, "x", "y"), 0);
    assert_eq!(
        result,
        Err(LedgerError::ValueMismatch {
            amount: 50,
            attached: 0
        })
    );
    assert_eq!(ledger.count_transfers(), 1);
    assert_eq!(ledger.balance_of(&b), 100);

    // two more credits to one receiver
    let c = AccountId::from("C");
    clock.advance(10);
    ledger
        .record_transfer(&a, TransferRequest::new("C", 30, "", ""), 30)
        .unwrap();
    clock.advance(10);
    ledger
        .record_transfer(&b, TransferRequest::new("C", 70, "", ""), 70)
        .unwrap();

    assert_eq!(ledger.balance_of(&c), 100);
    assert_eq!(ledger.count_transfers(), 3);
    assert_eq!(ledger.balance_of(&AccountId::from("nobody")), 0);

    let timestamps: Vec<_> = ledger.list_transfers().iter().map(|r| r.timestamp).collect();
    assert_eq!(timestamps, vec![1_000, 1_010, 1_020]);

    // earlier records are unchanged by later appends
    assert_eq!(ledger.transfer_at(0), Some(&first));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_events_mirror_history_under_concurrency() {
    let sink = BroadcastSink::new(1024);
    let mut events = sink.subscribe();

    let shared = SharedLedger::new(
        TransferLedger::new()
            .with_substrate(Wallets::new())
            .with_sink(sink)
            .with_clock(FixedClock(42)),
    );
    for name in ["s0", "s1", "s2", "s3"] {
        shared.fund_wallet(&AccountId::from(name), 100).await.unwrap();
    }

    let mut tasks = Vec::new();
    for name in ["s0", "s1", "s2", "s3"] {
        let shared = shared.clone();
        tasks.push(tokio::spawn(async move {
            let caller = AccountId::from(name);
            for amount in 1..=15u128 {
                // 1 + 2 + ... + 13 = 91 fits the wallet, 14 does not
                let request = TransferRequest::new("sink", amount, name, "");
                let _ = shared.record_transfer(&caller, request, amount).await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let snapshot = shared.snapshot().await;
    assert_eq!(snapshot.records.len(), 4 * 13);
    assert_eq!(snapshot.balances, vec![(AccountId::from("sink"), 4 * 91)]);

    for record in &snapshot.records {
        let event = events.try_recv().unwrap();
        assert_eq!(event.sender, record.sender);
        assert_eq!(event.receiver, record.receiver);
        assert_eq!(event.amount, record.amount);
        assert_eq!(event.message, record.message);
        assert_eq!(event.keyword, record.keyword);
        assert_eq!(event.timestamp, record.timestamp);
    }
    assert!(events.try_recv().is_err());

    for name in ["s0", "s1", "s2", "s3"] {
        assert_eq!(shared.wallet_balance(&AccountId::from(name)).await, Some(9));
    }
}
