pub mod core;
pub mod models;
pub mod analyzers;
pub mod blockchain;
pub mod report;
pub mod utils;

pub use crate::core::{BlockScanner, ChainClient, ScanConfig};
pub use crate::models::{ContractAddress, Finding, SkipReason, Verdict};
pub use crate::utils::{ScannerError, Result};
