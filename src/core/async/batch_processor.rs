//! Batch processing with account-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which applies batches of
//! parsed requests to a [`SharedLedger`] from several tokio tasks at once.
//!
//! # Design
//!
//! A batch is partitioned by acting account (the caller of a transfer, the
//! funded account of a funding). Partitions run concurrently while each one
//! keeps its requests in input order, so one caller's transfers are applied in
//! the order they were submitted. The ledger's write lock still serializes
//! every individual request.
//!
//! # Ordering
//!
//! Requests of different acting accounts may be applied in any relative
//! order. A transfer that depends on value received from another account in
//! the same batch may therefore see a different wallet balance than in the
//! sequential pipeline.

use std::collections::HashMap;

use super::SharedLedger;
use crate::types::{AccountId, LedgerError, LedgerRequest, TransferRecord};

/// Result of applying a single request
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The request that was applied
    pub request: LedgerRequest,

    /// `Some(record)` for a committed transfer, `None` for a funding
    pub result: Result<Option<TransferRecord>, LedgerError>,
}

/// Batch processor with account-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    ledger: SharedLedger,
}

impl BatchProcessor {
    pub fn new(ledger: SharedLedger) -> Self {
        Self { ledger }
    }

    /// Partition a batch by acting account
    ///
    /// # Guarantees
    ///
    /// - Each request appears in exactly one partition
    /// - Requests within a partition keep their batch order
    pub fn partition_by_account(
        &self,
        batch: Vec<LedgerRequest>,
    ) -> HashMap<AccountId, Vec<LedgerRequest>> {
        let mut partitions: HashMap<AccountId, Vec<LedgerRequest>> = HashMap::new();

        for request in batch {
            partitions
                .entry(request.acting_account().clone())
                .or_default()
                .push(request);
        }

        partitions
    }

    /// Apply one partition's requests sequentially
    ///
    /// Failures are captured in the results and do not stop the partition.
    pub async fn process_account_requests(
        &self,
        requests: Vec<LedgerRequest>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            let result = self.ledger.apply(request.clone()).await;
            results.push(ProcessingResult { request, result });
        }

        results
    }

    /// Apply a batch with one tokio task per acting account
    ///
    /// Waits for every task before returning. Results are grouped by
    /// partition, not in batch order.
    pub async fn process_batch(&self, batch: Vec<LedgerRequest>) -> Vec<ProcessingResult> {
        let partitions = self.partition_by_account(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for (_account, requests) in partitions {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_account_requests(requests).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(partition_results) => results.extend(partition_results),
                Err(e) => tracing::error!(error = %e, "partition task failed"),
            }
        }

        results
    }
}
