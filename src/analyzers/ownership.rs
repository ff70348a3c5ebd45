//! `owner()` probe
//!
//! Calls the Ownable `owner()` getter and reads the returned word as an
//! address. The all-zero address means ownership was renounced.

use crate::core::ChainClient;
use crate::models::{BlockTag, ContractAddress};
use crate::utils::{Result, ScannerError};

/// owner() = 0x8da5cb5b
pub const OWNER_SELECTOR: &str = "0x8da5cb5b";

/// 20 zero bytes, hex without prefix
pub const ZERO_ADDRESS: &str = "0000000000000000000000000000000000000000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerStatus {
    Renounced,
    /// Owner still set; 40 hex digits without prefix
    Active { owner: String },
}

/// Pull the owner address out of a raw `eth_call` answer.
///
/// - 66 chars or more (`0x` + one 32-byte word): chars `[26, 66)`
/// - 42..66 chars: chars `[2, 42)`
/// - anything shorter cannot hold an address and is an error
pub fn extract_owner(response: &str) -> Result<&str> {
    let len = response.len();

    let owner = if len >= 66 {
        response.get(26..66)
    } else if len >= 42 {
        response.get(2..42)
    } else if len > 2 {
        return Err(ScannerError::OwnerProbe(format!(
            "response too short for an address ({} chars)",
            len
        )));
    } else {
        return Err(ScannerError::OwnerProbe("empty response".into()));
    };

    owner.ok_or_else(|| ScannerError::OwnerProbe(format!("response is not hex: {:?}", response)))
}

pub fn is_renounced(owner: &str) -> bool {
    owner == ZERO_ADDRESS
}

/// Call `owner()` on `address` at the latest block
pub async fn probe_owner<C>(client: &C, address: &ContractAddress) -> Result<OwnerStatus>
where
    C: ChainClient + ?Sized,
{
    let response = client
        .call(address, OWNER_SELECTOR, BlockTag::Latest)
        .await
        .map_err(|e| ScannerError::OwnerProbe(format!("error calling contract: {}", e)))?;

    tracing::debug!("owner() on {} returned {}", address, response);

    let owner = extract_owner(&response)?;

    if is_renounced(owner) {
        Ok(OwnerStatus::Renounced)
    } else {
        Ok(OwnerStatus::Active {
            owner: owner.to_string(),
        })
    }
}
