use serde::Serialize;
use std::fmt;

use super::chain::ContractAddress;

/// A contract worth a human look
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub address: ContractAddress,
    pub explorer_url: String,
    pub bytecode_len: usize,
}

impl Finding {
    pub fn new(address: ContractAddress, explorer_base: &str, bytecode_len: usize) -> Self {
        let explorer_url = format!("{}/address/{}", explorer_base.trim_end_matches('/'), address);
        Self {
            address,
            explorer_url,
            bytecode_len,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.explorer_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Pattern gate matched; `pattern` is the first hit in table order
    SuspiciousPattern { pattern: &'static str },
    OwnershipNotChecked,
    /// owner() could not be called or its answer could not be read
    OwnerProbeFailed { reason: String },
    OwnershipActive { owner: String },
    BelowThreshold { bytecode_len: usize, threshold: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SuspiciousPattern { pattern } => write!(f, "suspicious pattern {:?}", pattern),
            SkipReason::OwnershipNotChecked => write!(f, "ownership not checked"),
            SkipReason::OwnerProbeFailed { reason } => f.write_str(reason),
            SkipReason::OwnershipActive { owner } => write!(f, "ownership not renounced (owner 0x{})", owner),
            SkipReason::BelowThreshold {
                bytecode_len,
                threshold,
            } => write!(f, "bytecode length {} <= {}", bytecode_len, threshold),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Flagged(Finding),
    Skipped(SkipReason),
}

impl Verdict {
    pub fn is_flagged(&self) -> bool {
        matches!(self, Verdict::Flagged(_))
    }

    pub fn finding(&self) -> Option<&Finding> {
        match self {
            Verdict::Flagged(finding) => Some(finding),
            Verdict::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Verdict::Flagged(_) => None,
            Verdict::Skipped(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_url() {
        let address = ContractAddress::new("0xabc");

        let finding = Finding::new(address.clone(), "https://bscscan.com/", 50_000);
        assert_eq!(finding.explorer_url, "https://bscscan.com/address/0xabc");
        assert_eq!(finding.to_string(), finding.explorer_url);

        let finding = Finding::new(address, "https://bscscan.com", 50_000);
        assert_eq!(finding.explorer_url, "https://bscscan.com/address/0xabc");
    }

    #[test]
    fn test_verdict_accessors() {
        let flagged = Verdict::Flagged(Finding::new(ContractAddress::new("0x1"), "https://x", 1));
        assert!(flagged.is_flagged());
        assert!(flagged.finding().is_some());
        assert!(flagged.skip_reason().is_none());

        let skipped = Verdict::Skipped(SkipReason::OwnershipNotChecked);
        assert!(!skipped.is_flagged());
        assert_eq!(skipped.skip_reason(), Some(&SkipReason::OwnershipNotChecked));
    }

    #[test]
    fn test_skip_reason_serializes_with_kind() {
        let json = serde_json::to_value(SkipReason::OwnerProbeFailed {
            reason: "empty response".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "owner_probe_failed", "reason": "empty response" })
        );
    }
}
