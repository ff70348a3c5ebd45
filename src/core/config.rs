use std::time::Duration;

use crate::utils::{Result, ScannerError};

pub const DEFAULT_RPC_URL: &str = "https://bsc-dataseed1.binance.org";
pub const DEFAULT_EXPLORER_URL: &str = "https://bscscan.com";
pub const DEFAULT_COMPLEXITY_THRESHOLD: usize = 40_000;
pub const DEFAULT_SLEEP_SECS: u64 = 10;
pub const DEFAULT_MAX_CATCH_UP: u64 = 32;

/// Scan settings, fixed for the life of the process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub rpc_url: String,
    pub explorer_url: String,
    /// Bytecode length (hex characters) a contract must exceed to be flagged
    pub complexity_threshold: usize,
    pub sleep: Duration,
    pub analysis: bool,
    pub check_ownership: bool,
    /// Process every block since the last poll instead of only the head
    pub catch_up: bool,
    pub max_catch_up: u64,
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(ScannerError::InvalidConfig("RPC URL is empty".into()));
        }
        if self.explorer_url.trim().is_empty() {
            return Err(ScannerError::InvalidConfig("explorer URL is empty".into()));
        }
        if self.max_catch_up == 0 {
            return Err(ScannerError::InvalidConfig("max catch-up must be at least 1".into()));
        }
        Ok(())
    }

    pub fn with_complexity_threshold(mut self, threshold: usize) -> Self {
        self.complexity_threshold = threshold;
        self
    }

    pub fn with_sleep(mut self, sleep: Duration) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn with_analysis(mut self, enabled: bool) -> Self {
        self.analysis = enabled;
        self
    }

    pub fn with_check_ownership(mut self, enabled: bool) -> Self {
        self.check_ownership = enabled;
        self
    }

    pub fn with_catch_up(mut self, enabled: bool, max_blocks: u64) -> Self {
        self.catch_up = enabled;
        self.max_catch_up = max_blocks;
        self
    }

    pub fn with_explorer_url(mut self, url: impl Into<String>) -> Self {
        self.explorer_url = url.into();
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            complexity_threshold: DEFAULT_COMPLEXITY_THRESHOLD,
            sleep: Duration::from_secs(DEFAULT_SLEEP_SECS),
            analysis: false,
            check_ownership: false,
            catch_up: false,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
        }
    }
}
