//! Scripted in-memory chain.
//!
//! Implements [`ChainClient`] from fixtures so the scan pipeline can be driven
//! without a node. Every call is recorded and can be inspected afterwards.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::ChainClient;
use crate::models::{
    Block, BlockHeight, BlockTag, Bytecode, ContractAddress, Transaction, TransactionReceipt, TxHash,
};
use crate::utils::{Result, ScannerError};

/// A call the mock received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CurrentHeight,
    Block(BlockHeight),
    Receipt(String),
    Call { to: String, data: String },
    Code(String),
}

#[derive(Default)]
struct MockState {
    heights: VecDeque<std::result::Result<u64, String>>,
    head: Option<u64>,
    blocks: HashMap<u64, std::result::Result<Block, String>>,
    receipts: HashMap<String, std::result::Result<Option<String>, String>>,
    owner_responses: HashMap<String, std::result::Result<String, String>>,
    code: HashMap<String, std::result::Result<String, String>>,
    calls: Vec<MockCall>,
}

#[derive(Default)]
pub struct MockChain {
    state: Mutex<MockState>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed chain head
    pub fn with_head(self, height: u64) -> Self {
        self.state.lock().head = Some(height);
        self
    }

    /// Heights returned by successive `current_height` calls; once drained
    /// the last successful one keeps being returned
    pub fn with_heights<I>(self, heights: I) -> Self
    where
        I: IntoIterator<Item = std::result::Result<u64, String>>,
    {
        self.state.lock().heights.extend(heights);
        self
    }

    pub fn with_block(self, height: u64, tx_hashes: &[&str]) -> Self {
        let transactions = tx_hashes
            .iter()
            .map(|hash| Transaction { hash: TxHash::new(hash) })
            .collect();
        self.state
            .lock()
            .blocks
            .insert(height, Ok(Block::new(BlockHeight(height), transactions)));
        self
    }

    pub fn with_failing_block(self, height: u64, error: &str) -> Self {
        self.state.lock().blocks.insert(height, Err(error.to_string()));
        self
    }

    /// Receipt for `tx_hash`, optionally carrying a created contract
    pub fn with_receipt(self, tx_hash: &str, contract_address: Option<&str>) -> Self {
        self.state.lock().receipts.insert(
            TxHash::new(tx_hash).as_str().to_string(),
            Ok(contract_address.map(str::to_string)),
        );
        self
    }

    pub fn with_failing_receipt(self, tx_hash: &str, error: &str) -> Self {
        self.state
            .lock()
            .receipts
            .insert(TxHash::new(tx_hash).as_str().to_string(), Err(error.to_string()));
        self
    }

    /// Raw answer of `owner()` on `address`
    pub fn with_owner_response(self, address: &str, response: &str) -> Self {
        self.state
            .lock()
            .owner_responses
            .insert(ContractAddress::new(address).as_str().to_string(), Ok(response.to_string()));
        self
    }

    pub fn with_failing_owner_call(self, address: &str, error: &str) -> Self {
        self.state
            .lock()
            .owner_responses
            .insert(ContractAddress::new(address).as_str().to_string(), Err(error.to_string()));
        self
    }

    pub fn with_code(self, address: &str, code: &str) -> Self {
        self.state
            .lock()
            .code
            .insert(ContractAddress::new(address).as_str().to_string(), Ok(code.to_string()));
        self
    }

    pub fn with_failing_code(self, address: &str, error: &str) -> Self {
        self.state
            .lock()
            .code
            .insert(ContractAddress::new(address).as_str().to_string(), Err(error.to_string()));
        self
    }

    /// Move the head while a scanner is using the mock
    pub fn set_head(&self, height: u64) {
        self.state.lock().head = Some(height);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    pub fn code_fetches(&self) -> usize {
        self.count(|call| matches!(call, MockCall::Code(_)))
    }

    pub fn owner_calls(&self) -> usize {
        self.count(|call| matches!(call, MockCall::Call { .. }))
    }

    pub fn blocks_fetched(&self) -> Vec<BlockHeight> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                MockCall::Block(height) => Some(*height),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: MockCall) {
        self.state.lock().calls.push(call);
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn current_height(&self) -> Result<BlockHeight> {
        self.record(MockCall::CurrentHeight);

        let mut state = self.state.lock();
        match state.heights.pop_front() {
            Some(Ok(height)) => {
                state.head = Some(height);
                Ok(BlockHeight(height))
            }
            Some(Err(error)) => Err(ScannerError::Transport(error)),
            None => state
                .head
                .map(BlockHeight)
                .ok_or_else(|| ScannerError::Transport("no chain head configured".into())),
        }
    }

    async fn block(&self, height: BlockHeight) -> Result<Block> {
        self.record(MockCall::Block(height));

        match self.state.lock().blocks.get(&height.as_u64()) {
            Some(Ok(block)) => Ok(block.clone()),
            Some(Err(error)) => Err(ScannerError::Transport(error.clone())),
            None => Ok(Block::new(height, Vec::new())),
        }
    }

    async fn receipt(&self, tx_hash: &TxHash) -> Result<TransactionReceipt> {
        self.record(MockCall::Receipt(tx_hash.as_str().to_string()));

        match self.state.lock().receipts.get(tx_hash.as_str()) {
            Some(Ok(address)) => Ok(TransactionReceipt::new(tx_hash.clone(), address.as_deref())),
            Some(Err(error)) => Err(ScannerError::Transport(error.clone())),
            None => Ok(TransactionReceipt::new(tx_hash.clone(), None)),
        }
    }

    async fn call(&self, to: &ContractAddress, data: &str, _tag: BlockTag) -> Result<String> {
        self.record(MockCall::Call {
            to: to.as_str().to_string(),
            data: data.to_string(),
        });

        match self.state.lock().owner_responses.get(to.as_str()) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(error)) => Err(ScannerError::Transport(error.clone())),
            None => Ok("0x".to_string()),
        }
    }

    async fn code(&self, address: &ContractAddress, _tag: BlockTag) -> Result<Bytecode> {
        self.record(MockCall::Code(address.as_str().to_string()));

        match self.state.lock().code.get(address.as_str()) {
            Some(Ok(code)) => Ok(Bytecode::new(code.clone())),
            Some(Err(error)) => Err(ScannerError::Transport(error.clone())),
            None => Ok(Bytecode::new("0x")),
        }
    }
}
