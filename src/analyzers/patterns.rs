/// Suspicious-construct table, checked in order
pub const SUSPICIOUS_PATTERNS: &[&str] = &[
    "selfdestruct(",
    "delegatecall(",
    "call.value(",
    ".transfer(",
    "suicide(",
    "sha3(",
    "callcode(",
    "assembly {",
    "block.timestamp",
    "blockhash(",
    "tx.origin",
    "gasleft(",
    "ecrecover(",
    "msg.sender.send(",
    "create2(",
    "keccak256(abi.encodePacked(",
    "addmod(",
    "mulmod(",
    "revert(",
    "assert(",
    "require(",
    "throw ",
    "msg.value",
    "block.number",
    "block.difficulty",
    "block.coinbase",
    "now", // block.timestamp alias
    "gasprice",
    "this.balance",
    "tx.gasprice",
    ".call(",
    ".send(",
    "for {",
    "while {",
    "unchecked {",
    "storage slot",
    "external contract",
    "inline assembly",
    "signed integer",
    "permanent storage write",
    "arbitrary jump",
    "high gas usage",
    "transaction origin",
    "floating pragma",
    "shadowing state variables",
    "hardcoded address",
    "magic numbers",
    "unprotected SELFDESTRUCT",
    "missing return value",
    "unchecked return value",
    "reentrancy",
    "unchecked math",
    "denial of service",
    "front running",
    "time manipulation",
    "block miner manipulation",
    "randomness source",
    "hardcoded gas amount",
    "gas limit",
];

/// Plain substring gate over a fixed pattern table.
///
/// Matching is case-sensitive containment; the first pattern in table order
/// that occurs anywhere in the subject wins. Deployed bytecode is hex, so in
/// practice most entries can never match it.
pub struct PatternGate {
    patterns: Vec<&'static str>,
}

impl PatternGate {
    pub fn new() -> Self {
        Self {
            patterns: SUSPICIOUS_PATTERNS.to_vec(),
        }
    }

    /// First table entry contained in `subject`
    pub fn first_match(&self, subject: &str) -> Option<&'static str> {
        let hit = self.patterns.iter().copied().find(|pattern| subject.contains(pattern));

        if let Some(pattern) = hit {
            tracing::debug!("Suspicious pattern found: {:?}", pattern);
        }

        hit
    }
}

impl Default for PatternGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert!(SUSPICIOUS_PATTERNS.len() >= 55);
        assert_eq!(SUSPICIOUS_PATTERNS[0], "selfdestruct(");
    }

    #[test]
    fn test_clean_subject_passes() {
        let gate = PatternGate::new();
        assert_eq!(gate.first_match("0x6080604052348015600f57600080fd5b50"), None);
        assert_eq!(gate.first_match(""), None);
    }

    #[test]
    fn test_earliest_table_entry_wins() {
        let gate = PatternGate::new();

        // "reentrancy" appears first in the text, "tx.origin" earlier in the table
        let subject = "reentrancy guard bypassed via tx.origin";
        assert_eq!(gate.first_match(subject), Some("tx.origin"));

        assert_eq!(gate.first_match("x.delegatecall(data); selfdestruct(owner)"), Some("selfdestruct("));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let gate = PatternGate::new();
        assert_eq!(gate.first_match("TX.ORIGIN"), None);
        assert_eq!(gate.first_match("unprotected SELFDESTRUCT"), Some("unprotected SELFDESTRUCT"));
    }

    #[test]
    fn test_every_pattern_is_found_on_its_own() {
        let gate = PatternGate::new();
        for (index, pattern) in SUSPICIOUS_PATTERNS.iter().enumerate() {
            let hit = gate.first_match(pattern).expect("pattern must match itself");
            let hit_index = SUSPICIOUS_PATTERNS.iter().position(|p| *p == hit).unwrap();
            // a pattern may contain an earlier entry ("tx.gasprice" contains "gasprice")
            assert!(hit_index <= index, "{} reported as {}", pattern, hit);
        }
    }
}
