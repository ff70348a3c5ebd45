use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, BlockId, BlockNumber, Bytes, TransactionRequest, H256, U64};
use std::sync::Arc;

use crate::core::ChainClient;
use crate::models::{
    Block, BlockHeight, BlockTag, Bytecode, ContractAddress, Transaction, TransactionReceipt, TxHash,
};
use crate::utils::{Result, ScannerError};

/// Blockchain RPC client
pub struct BlockchainClient {
    provider: Arc<Provider<Http>>,
    chain_id: u64,
}

impl BlockchainClient {
    /// Create a new client. Fails if the endpoint cannot answer `eth_chainId`.
    pub async fn new(rpc_url: &str) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ScannerError::InvalidConfig(format!("Invalid RPC URL: {}", e)))?;

        let provider = Arc::new(provider);

        let chain_id = provider.get_chainid().await?;

        tracing::info!("Connected to chain ID: {}", chain_id);

        Ok(Self {
            provider,
            chain_id: chain_id.as_u64(),
        })
    }

    /// Get chain ID
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get chain name
    pub fn chain_name(&self) -> &'static str {
        chain_name(self.chain_id)
    }
}

pub fn chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "Ethereum Mainnet",
        56 => "BNB Smart Chain",
        97 => "BNB Smart Chain Testnet",
        137 => "Polygon",
        369 => "PulseChain",
        943 => "PulseChain Testnet",
        _ => "Unknown Chain",
    }
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        match tag {
            BlockTag::Latest => BlockId::Number(BlockNumber::Latest),
            BlockTag::Number(height) => BlockId::Number(BlockNumber::Number(U64::from(height.as_u64()))),
        }
    }
}

fn parse_address(address: &ContractAddress) -> Result<Address> {
    address.as_str().parse().map_err(|e| {
        ScannerError::decode("address", format!("{}: {}", address, e))
    })
}

/// `0x`-prefixed lowercase hex, the form the node sends on the wire
fn to_hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[async_trait]
impl ChainClient for BlockchainClient {
    async fn current_height(&self) -> Result<BlockHeight> {
        let block = self.provider.get_block_number().await?;
        Ok(BlockHeight(block.as_u64()))
    }

    async fn block(&self, height: BlockHeight) -> Result<Block> {
        tracing::debug!("Fetching block {}", height);

        let block = self
            .provider
            .get_block_with_txs(BlockId::from(BlockTag::Number(height)))
            .await?
            .ok_or_else(|| ScannerError::decode("eth_getBlockByNumber", format!("block {} not found", height)))?;

        let transactions = block
            .transactions
            .iter()
            .map(|tx| Transaction {
                hash: TxHash::new(&format!("{:?}", tx.hash)),
            })
            .collect();

        Ok(Block::new(height, transactions))
    }

    async fn receipt(&self, tx_hash: &TxHash) -> Result<TransactionReceipt> {
        let hash: H256 = tx_hash.as_str().parse().map_err(|e| {
            ScannerError::decode("eth_getTransactionReceipt", format!("{}: {}", tx_hash, e))
        })?;

        let receipt = self.provider.get_transaction_receipt(hash).await?;

        // unknown or pending transactions have no receipt and created nothing
        let contract_address = receipt
            .and_then(|receipt| receipt.contract_address)
            .map(|address| format!("{:?}", address));

        Ok(TransactionReceipt::new(tx_hash.clone(), contract_address.as_deref()))
    }

    async fn call(&self, to: &ContractAddress, data: &str, tag: BlockTag) -> Result<String> {
        let data: Bytes = data.parse().map_err(|e| {
            ScannerError::decode("eth_call", format!("calldata {:?}: {}", data, e))
        })?;

        let tx: TypedTransaction = TransactionRequest::new()
            .to(parse_address(to)?)
            .data(data)
            .into();

        let response = self.provider.call(&tx, Some(tag.into())).await?;
        Ok(to_hex_string(&response))
    }

    async fn code(&self, address: &ContractAddress, tag: BlockTag) -> Result<Bytecode> {
        tracing::debug!("Fetching bytecode for {}", address);

        let code = self
            .provider
            .get_code(parse_address(address)?, Some(tag.into()))
            .await?;

        Ok(Bytecode::new(to_hex_string(&code)))
    }
}
