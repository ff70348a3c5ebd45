use async_trait::async_trait;
use crate::models::{Block, BlockHeight, BlockTag, Bytecode, ContractAddress, TransactionReceipt, TxHash};
use crate::utils::Result;

/// Core abstraction: the chain operations the scan pipeline needs.
///
/// Implementations decode every response into the typed model before
/// returning; nothing untyped crosses this boundary.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Height of the current chain head
    async fn current_height(&self) -> Result<BlockHeight>;

    /// Block at `height` with its transactions
    async fn block(&self, height: BlockHeight) -> Result<Block>;

    /// Receipt for a mined transaction
    async fn receipt(&self, tx_hash: &TxHash) -> Result<TransactionReceipt>;

    /// Read-only contract call, returning the raw hex answer
    async fn call(&self, to: &ContractAddress, data: &str, tag: BlockTag) -> Result<String>;

    /// Deployed code at `address`
    async fn code(&self, address: &ContractAddress, tag: BlockTag) -> Result<Bytecode>;
}
