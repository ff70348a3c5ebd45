use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;

use crate::core::ChainClient;
use crate::models::{Block, ContractAddress};

/// Finds the contracts a block deployed
pub struct ContractResolver<C: ?Sized> {
    client: Arc<C>,
}

impl<C> ContractResolver<C>
where
    C: ChainClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Addresses created by `block`, in transaction order.
    ///
    /// Receipts are fetched one at a time as the stream is polled. A failed
    /// receipt fetch drops that transaction only.
    pub fn resolve<'a>(&'a self, block: &'a Block) -> impl Stream<Item = ContractAddress> + 'a {
        stream::iter(block.transactions.iter()).filter_map(move |tx| async move {
            match self.client.receipt(&tx.hash).await {
                Ok(receipt) => receipt.contract_address,
                Err(e) => {
                    tracing::warn!("Error getting contract address for {}: {}", tx.hash, e);
                    None
                }
            }
        })
    }

    pub async fn resolve_all(&self, block: &Block) -> Vec<ContractAddress> {
        self.resolve(block).collect().await
    }
}
