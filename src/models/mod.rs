pub mod chain;
pub mod verdict;

pub use chain::{
    with_hex_prefix, Block, BlockHeight, BlockTag, Bytecode, ContractAddress, Transaction,
    TransactionReceipt, TxHash,
};
pub use verdict::{Finding, SkipReason, Verdict};
