use std::sync::Arc;

use crate::analyzers::ownership::{probe_owner, OwnerStatus};
use crate::analyzers::patterns::PatternGate;
use crate::core::{ChainClient, ScanConfig};
use crate::models::{BlockTag, Bytecode, ContractAddress, Finding, SkipReason, Verdict};
use crate::utils::Result;

/// Risk pipeline for a freshly deployed contract.
///
/// Gates run in order and the first disqualifying one ends classification:
/// 1. suspicious-pattern scan of the bytecode (when `analysis` is on)
/// 2. ownership renunciation (contracts are never flagged when off)
/// 3. bytecode length above `complexity_threshold`
///
/// Only renounced contracts with large bytecode come out `Flagged`.
pub struct ContractClassifier {
    config: Arc<ScanConfig>,
    patterns: PatternGate,
}

impl ContractClassifier {
    pub fn new(config: Arc<ScanConfig>) -> Self {
        Self {
            config,
            patterns: PatternGate::new(),
        }
    }

    pub async fn classify<C>(&self, client: &C, address: &ContractAddress) -> Result<Verdict>
    where
        C: ChainClient + ?Sized,
    {
        let mut bytecode: Option<Bytecode> = None;

        if self.config.analysis {
            let code = client.code(address, BlockTag::Latest).await?;
            if let Some(pattern) = self.patterns.first_match(code.as_str()) {
                return Ok(Verdict::Skipped(SkipReason::SuspiciousPattern { pattern }));
            }
            bytecode = Some(code);
        }

        if !self.config.check_ownership {
            return Ok(Verdict::Skipped(SkipReason::OwnershipNotChecked));
        }

        match probe_owner(client, address).await {
            Ok(OwnerStatus::Renounced) => {}
            Ok(OwnerStatus::Active { owner }) => {
                return Ok(Verdict::Skipped(SkipReason::OwnershipActive { owner }));
            }
            Err(e) => {
                return Ok(Verdict::Skipped(SkipReason::OwnerProbeFailed {
                    reason: e.to_string(),
                }));
            }
        }

        let code = match bytecode {
            Some(code) => code,
            None => client.code(address, BlockTag::Latest).await?,
        };

        let threshold = self.config.complexity_threshold;
        if code.char_len() > threshold {
            Ok(Verdict::Flagged(Finding::new(
                address.clone(),
                &self.config.explorer_url,
                code.char_len(),
            )))
        } else {
            Ok(Verdict::Skipped(SkipReason::BelowThreshold {
                bytecode_len: code.char_len(),
                threshold,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::ownership::ZERO_ADDRESS;
    use crate::blockchain::MockChain;

    const CONTRACT: &str = "0xabc0000000000000000000000000000000000123";
    const OWNER: &str = "5b38da6a701c568545dcfcb03fcb875f56beddc4";

    fn word(address: &str) -> String {
        format!("0x{}{}", "0".repeat(24), address)
    }

    fn code_of_len(len: usize) -> String {
        format!("0x{}", "6".repeat(len - 2))
    }

    fn classifier(config: ScanConfig) -> ContractClassifier {
        ContractClassifier::new(Arc::new(config))
    }

    fn renounced_chain(code_len: usize) -> MockChain {
        MockChain::new()
            .with_owner_response(CONTRACT, &word(ZERO_ADDRESS))
            .with_code(CONTRACT, &code_of_len(code_len))
    }

    #[tokio::test]
    async fn test_renounced_and_large_is_flagged() {
        let chain = renounced_chain(50_000);
        let verdict = classifier(ScanConfig::default().with_check_ownership(true))
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();

        let finding = verdict.finding().expect("should be flagged");
        assert_eq!(finding.bytecode_len, 50_000);
        assert_eq!(finding.explorer_url, format!("https://bscscan.com/address/{}", CONTRACT));
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        let chain = renounced_chain(40_000);
        let verdict = classifier(ScanConfig::default().with_check_ownership(true))
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();

        assert_eq!(
            verdict,
            Verdict::Skipped(SkipReason::BelowThreshold {
                bytecode_len: 40_000,
                threshold: 40_000
            })
        );
    }

    #[tokio::test]
    async fn test_active_owner_stops_before_code_fetch() {
        let chain = MockChain::new()
            .with_owner_response(CONTRACT, &word(OWNER))
            .with_code(CONTRACT, &code_of_len(50_000));

        let verdict = classifier(ScanConfig::default().with_check_ownership(true))
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();

        assert_eq!(
            verdict,
            Verdict::Skipped(SkipReason::OwnershipActive { owner: OWNER.to_string() })
        );
        assert_eq!(chain.code_fetches(), 0);
    }

    #[tokio::test]
    async fn test_ownership_unchecked_never_flags() {
        let chain = renounced_chain(1_000_000);
        let verdict = classifier(ScanConfig::default())
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();

        assert_eq!(verdict, Verdict::Skipped(SkipReason::OwnershipNotChecked));
        assert_eq!(chain.owner_calls(), 0);
        assert_eq!(chain.code_fetches(), 0);
    }

    #[tokio::test]
    async fn test_probe_failure_is_skipped() {
        let chain = MockChain::new()
            .with_failing_owner_call(CONTRACT, "execution reverted")
            .with_code(CONTRACT, &code_of_len(50_000));

        let verdict = classifier(ScanConfig::default().with_check_ownership(true))
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();

        assert!(matches!(
            verdict,
            Verdict::Skipped(SkipReason::OwnerProbeFailed { .. })
        ));

        let chain = renounced_chain(50_000).with_owner_response(CONTRACT, "0x");
        let verdict = classifier(ScanConfig::default().with_check_ownership(true))
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();
        assert!(!verdict.is_flagged());
    }

    #[tokio::test]
    async fn test_pattern_gate_skips_before_ownership() {
        let chain = renounced_chain(50_000).with_code(CONTRACT, "0x6080 selfdestruct(owner)");

        let config = ScanConfig::default()
            .with_analysis(true)
            .with_check_ownership(true);
        let verdict = classifier(config)
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();

        assert_eq!(
            verdict,
            Verdict::Skipped(SkipReason::SuspiciousPattern { pattern: "selfdestruct(" })
        );
        assert_eq!(chain.owner_calls(), 0);
    }

    #[tokio::test]
    async fn test_pattern_gate_reuses_fetched_code() {
        let chain = renounced_chain(50_000);

        let config = ScanConfig::default()
            .with_analysis(true)
            .with_check_ownership(true);
        let verdict = classifier(config)
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await
            .unwrap();

        assert!(verdict.is_flagged());
        assert_eq!(chain.code_fetches(), 1);
    }

    #[tokio::test]
    async fn test_raising_threshold_never_adds_flags() {
        let lengths = [10_000, 40_001, 60_000, 120_000];
        let thresholds = [0, 40_000, 60_000, 200_000];
        let mut previous = usize::MAX;

        for threshold in thresholds {
            let mut flagged = 0;
            for len in lengths {
                let chain = renounced_chain(len);
                let config = ScanConfig::default()
                    .with_check_ownership(true)
                    .with_complexity_threshold(threshold);
                let verdict = classifier(config)
                    .classify(&chain, &ContractAddress::new(CONTRACT))
                    .await
                    .unwrap();
                if verdict.is_flagged() {
                    flagged += 1;
                }
            }
            assert!(flagged <= previous, "threshold {} flagged {}", threshold, flagged);
            previous = flagged;
        }
    }

    #[tokio::test]
    async fn test_code_fetch_failure_propagates() {
        let chain = MockChain::new()
            .with_owner_response(CONTRACT, &word(ZERO_ADDRESS))
            .with_failing_code(CONTRACT, "connection reset");

        let result = classifier(ScanConfig::default().with_check_ownership(true))
            .classify(&chain, &ContractAddress::new(CONTRACT))
            .await;

        assert!(result.is_err());
    }
}
