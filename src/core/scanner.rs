use futures::StreamExt;
use std::sync::Arc;

use crate::analyzers::ContractClassifier;
use crate::core::{ChainClient, ContractResolver, ScanConfig};
use crate::models::{BlockHeight, ContractAddress, Finding, SkipReason, Verdict};
use crate::report::Reporter;
use crate::utils::Result;

/// What happened to one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
    pub height: BlockHeight,
    pub transactions: usize,
    pub contracts: usize,
    pub flagged: Vec<Finding>,
    pub skipped: usize,
    /// Contracts whose classification errored
    pub failed: usize,
}

impl BlockReport {
    fn new(height: BlockHeight, transactions: usize) -> Self {
        Self {
            height,
            transactions,
            contracts: 0,
            flagged: Vec::new(),
            skipped: 0,
            failed: 0,
        }
    }
}

/// Result of a single poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Head could not be read; nothing was processed
    HeightUnavailable,
    /// Catch-up mode only: the head has not moved since the last poll
    UpToDate(BlockHeight),
    /// Reports for the blocks that were processed; failed blocks are absent
    Processed(Vec<BlockReport>),
}

/// Heights to process for a poll that observed `head`.
///
/// Without catch-up this is always just the head. With it, every block after
/// `last_seen` up to the head, keeping only the newest `max_blocks`.
pub fn plan_heights(
    last_seen: Option<BlockHeight>,
    head: BlockHeight,
    catch_up: bool,
    max_blocks: u64,
) -> Vec<BlockHeight> {
    let last = match (catch_up, last_seen) {
        (true, Some(last)) => last,
        _ => return vec![head],
    };

    if head <= last {
        return Vec::new();
    }

    let first = last.next().as_u64();
    let window_start = head.as_u64().saturating_sub(max_blocks.saturating_sub(1));
    let start = first.max(window_start);

    if start > first {
        tracing::warn!(
            "Falling behind: skipping blocks {}..{} to stay within {} blocks of head",
            first,
            start - 1,
            max_blocks
        );
    }

    (start..=head.as_u64()).map(BlockHeight).collect()
}

/// Polls the chain head and pushes each new block through the pipeline
pub struct BlockScanner<C: ?Sized> {
    client: Arc<C>,
    config: Arc<ScanConfig>,
    resolver: ContractResolver<C>,
    classifier: ContractClassifier,
    reporter: Arc<dyn Reporter>,
    last_seen: Option<BlockHeight>,
}

impl<C> BlockScanner<C>
where
    C: ChainClient + ?Sized,
{
    pub fn new(client: Arc<C>, config: Arc<ScanConfig>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            resolver: ContractResolver::new(client.clone()),
            classifier: ContractClassifier::new(config.clone()),
            client,
            config,
            reporter,
            last_seen: None,
        }
    }

    pub fn last_seen(&self) -> Option<BlockHeight> {
        self.last_seen
    }

    /// Poll forever. Never returns.
    pub async fn run(&mut self) {
        tracing::info!(
            "Scanning: threshold {} chars, sleep {:?}, analysis {}, ownership check {}, catch-up {}",
            self.config.complexity_threshold,
            self.config.sleep,
            self.config.analysis,
            self.config.check_ownership,
            self.config.catch_up
        );

        loop {
            match self.poll_once().await {
                PollOutcome::Processed(reports) => {
                    for report in &reports {
                        tracing::debug!(
                            "Block {}: {} txs, {} contracts, {} flagged, {} skipped, {} failed",
                            report.height,
                            report.transactions,
                            report.contracts,
                            report.flagged.len(),
                            report.skipped,
                            report.failed
                        );
                    }
                }
                PollOutcome::UpToDate(head) => tracing::debug!("No new block since {}", head),
                PollOutcome::HeightUnavailable => {}
            }

            tokio::time::sleep(self.config.sleep).await;
        }
    }

    /// One loop iteration, without the trailing sleep
    pub async fn poll_once(&mut self) -> PollOutcome {
        let head = match self.client.current_height().await {
            Ok(head) => head,
            Err(e) => {
                tracing::warn!("Error getting current block number: {}", e);
                return PollOutcome::HeightUnavailable;
            }
        };

        let heights = plan_heights(
            self.last_seen,
            head,
            self.config.catch_up,
            self.config.max_catch_up,
        );
        if heights.is_empty() {
            return PollOutcome::UpToDate(head);
        }

        let mut reports = Vec::with_capacity(heights.len());
        for height in heights {
            match self.process_block(height).await {
                Ok(report) => reports.push(report),
                Err(e) => tracing::warn!("Error processing block {}: {}", height, e),
            }
            // failed blocks are never retried
            self.last_seen = Some(height);
        }

        PollOutcome::Processed(reports)
    }

    /// Resolve and classify every contract deployed in `height`
    pub async fn process_block(&self, height: BlockHeight) -> Result<BlockReport> {
        let block = self.client.block(height).await?;
        let mut report = BlockReport::new(height, block.transactions.len());

        let contracts = self.resolver.resolve(&block);
        futures::pin_mut!(contracts);

        while let Some(address) = contracts.next().await {
            report.contracts += 1;

            match self.classifier.classify(self.client.as_ref(), &address).await {
                Ok(Verdict::Flagged(finding)) => {
                    tracing::info!(
                        "Flagged contract {} in block {} ({} chars of bytecode)",
                        address,
                        height,
                        finding.bytecode_len
                    );
                    self.reporter.report(&finding);
                    report.flagged.push(finding);
                }
                Ok(Verdict::Skipped(reason)) => {
                    log_skip(&address, &reason);
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!("Error classifying contract {}: {}", address, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

fn log_skip(address: &ContractAddress, reason: &SkipReason) {
    match reason {
        SkipReason::SuspiciousPattern { pattern } => {
            tracing::warn!("Suspicious contract found at address: {} (pattern {:?})", address, pattern)
        }
        SkipReason::OwnershipNotChecked => {
            tracing::warn!("/!\\ Ownership not checked for contract at address: {}", address)
        }
        // probe failures keep the historical "renounced" wording
        SkipReason::OwnerProbeFailed { reason } => {
            tracing::warn!("Ownership renounced for contract at address: {} ({})", address, reason)
        }
        SkipReason::OwnershipActive { owner } => {
            tracing::warn!(
                "Ownership not renounced for contract at address: {} (owner 0x{})",
                address,
                owner
            )
        }
        SkipReason::BelowThreshold { .. } => {
            tracing::debug!("Contract {} skipped: {}", address, reason)
        }
    }
}
