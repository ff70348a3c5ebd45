//! Chain entities as seen by the scanner
//!
//! The client converts node responses into these types at its boundary. They
//! live only for the duration of one scan pass.

use serde::Serialize;
use std::fmt;

/// Prefix `0x` unless the value already carries it
pub fn with_hex_prefix(value: &str) -> String {
    if value.starts_with("0x") {
        value.to_string()
    } else {
        format!("0x{}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}

/// Block parameter for queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    #[default]
    Latest,
    Number(BlockHeight),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: &str) -> Self {
        Self(with_hex_prefix(hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn new(address: &str) -> Self {
        Self(with_hex_prefix(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deployed code, `0x`-prefixed hex as `eth_getCode` returns it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bytecode(String);

impl Bytecode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Length in hex characters, prefix included
    pub fn char_len(&self) -> usize {
        self.0.len()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: TxHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub height: BlockHeight,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(height: BlockHeight, transactions: Vec<Transaction>) -> Self {
        Self { height, transactions }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    /// Present only when the transaction created a contract
    pub contract_address: Option<ContractAddress>,
}

impl TransactionReceipt {
    /// An empty or bare `0x` address counts as no contract created
    pub fn new(transaction_hash: TxHash, contract_address: Option<&str>) -> Self {
        let contract_address = contract_address
            .filter(|address| !address.is_empty() && *address != "0x")
            .map(ContractAddress::new);

        Self {
            transaction_hash,
            contract_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_keeps_real_contract_address() {
        let receipt = TransactionReceipt::new(TxHash::new("0x01"), Some("0xabc"));
        assert_eq!(receipt.contract_address, Some(ContractAddress::new("0xabc")));

        let receipt = TransactionReceipt::new(TxHash::new("0x01"), Some("abc"));
        assert_eq!(receipt.contract_address, Some(ContractAddress::new("0xabc")));
    }

    #[test]
    fn test_receipt_ignores_empty_contract_address() {
        for address in [None, Some(""), Some("0x")] {
            let receipt = TransactionReceipt::new(TxHash::new("0x01"), address);
            assert_eq!(receipt.contract_address, None, "{:?}", address);
        }
    }

    #[test]
    fn test_hex_prefix() {
        assert_eq!(ContractAddress::new("abc").as_str(), "0xabc");
        assert_eq!(ContractAddress::new("0xabc").as_str(), "0xabc");
        assert_eq!(TxHash::new("01").as_str(), "0x01");
    }

    #[test]
    fn test_bytecode_length_counts_prefix() {
        assert_eq!(Bytecode::new("0x6080").char_len(), 6);
        assert_eq!(Bytecode::default().char_len(), 0);
    }
}
