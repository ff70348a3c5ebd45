//! Output for flagged contracts

use parking_lot::Mutex;

use crate::models::Finding;

pub trait Reporter: Send + Sync {
    fn report(&self, finding: &Finding);
}

/// Prints the explorer link of every finding to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, finding: &Finding) {
        println!("{}", finding);
        println!();
    }
}

/// Keeps findings in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    findings: Mutex<Vec<Finding>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn findings(&self) -> Vec<Finding> {
        self.findings.lock().clone()
    }

    /// Printed form of each finding, one per line
    pub fn lines(&self) -> Vec<String> {
        self.findings.lock().iter().map(ToString::to_string).collect()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, finding: &Finding) {
        self.findings.lock().push(finding.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContractAddress;

    #[test]
    fn test_memory_reporter_keeps_order() {
        let reporter = MemoryReporter::new();
        reporter.report(&Finding::new(ContractAddress::new("0x01"), "https://bscscan.com", 10));
        reporter.report(&Finding::new(ContractAddress::new("0x02"), "https://bscscan.com", 10));

        assert_eq!(
            reporter.lines(),
            vec![
                "https://bscscan.com/address/0x01".to_string(),
                "https://bscscan.com/address/0x02".to_string(),
            ]
        );
    }
}
