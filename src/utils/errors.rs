use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("RPC error: {0}")]
    RpcError(#[from] ethers::providers::ProviderError),

    #[error("Unexpected {method} response: {reason}")]
    Decode {
        method: &'static str,
        reason: String,
    },

    #[error("owner() probe failed: {0}")]
    OwnerProbe(String),

    /// Failure reported by a non-RPC chain source
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ScannerError {
    pub fn decode(method: &'static str, reason: impl Into<String>) -> Self {
        ScannerError::Decode {
            method,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_keeps_message() {
        let err = ScannerError::Transport("connection reset".into());
        assert_eq!(err.to_string(), "Transport error: connection reset");
        assert!(!matches!(err, ScannerError::RpcError(_)));
    }
}
