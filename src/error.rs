//! Error taxonomy for wallet session operations.

use thiserror::Error;

/// Errors surfaced by the wallet session subsystem.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Operation requires an active wallet session.
    #[error("no wallet session is active")]
    NotConnected,

    /// A connect or disconnect is already in flight.
    #[error("a connection attempt is already in progress")]
    ConnectionInProgress,

    /// The signer refused the connection handshake.
    #[error("connection rejected by signer: {0}")]
    ConnectionRejected(String),

    /// The handshake failed before the signer could answer.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Balance query failed; the previously cached value is retained.
    #[error("balance fetch failed: {0}")]
    BalanceFetchFailed(String),

    /// Amount failed local validation and was never sent to the bridge.
    #[error("invalid amount \"{amount}\": {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// The signer or network refused the submission.
    #[error("transaction rejected: {0}")]
    TransactionRejected(String),

    /// The transaction was mined but reverted on-chain.
    #[error("transaction reverted: {0}")]
    TransactionReverted(String),

    /// The transaction was not confirmed within the monitoring window.
    #[error("transaction not confirmed after {0} seconds")]
    ConfirmationTimeout(u64),

    /// Auth-session write failed; wallet and auth state may disagree.
    #[error("session sync failed: {0}")]
    SessionSyncFailed(String),
}

/// Result type for wallet session operations.
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletError::NotConnected;
        assert_eq!(err.to_string(), "no wallet session is active");

        let err = WalletError::InvalidAmount {
            amount: "-1".to_string(),
            reason: "amount must be positive".to_string(),
        };
        assert!(err.to_string().contains("-1"));
        assert!(err.to_string().contains("positive"));

        let err = WalletError::ConfirmationTimeout(180);
        assert_eq!(
            err.to_string(),
            "transaction not confirmed after 180 seconds"
        );
    }
}
