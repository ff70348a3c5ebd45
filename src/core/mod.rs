pub mod traits;
pub mod config;
pub mod resolver;
pub mod scanner;

pub use traits::ChainClient;
pub use config::ScanConfig;
pub use resolver::ContractResolver;
pub use scanner::{plan_heights, BlockReport, BlockScanner, PollOutcome};
