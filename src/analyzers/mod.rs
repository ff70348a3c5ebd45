pub mod patterns;
pub mod ownership;
pub mod classifier;

pub use classifier::ContractClassifier;
pub use ownership::{probe_owner, OwnerStatus};
pub use patterns::{PatternGate, SUSPICIOUS_PATTERNS};
