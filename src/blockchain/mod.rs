pub mod client;
pub mod mock;

pub use client::BlockchainClient;
pub use mock::{MockCall, MockChain};
