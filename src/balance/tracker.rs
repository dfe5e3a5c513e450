//! Fetches and caches the native balance of the active account.
//!
//! Refreshes are triggered after a successful connect and after each
//! confirmed transaction, and always re-fetch from the chain; the balance
//! is never computed locally from a submitted amount. A completed fetch is
//! committed only while its address is still the active account, so a slow
//! fetch from a previous session can never overwrite the current one.

use std::sync::Arc;

use crate::bridge::provider::ProviderBridge;
use crate::error::{WalletError, WalletResult};
use crate::wallet::state::SessionState;

/// Balance cache for the active wallet session.
pub struct BalanceTracker {
    bridge: Arc<dyn ProviderBridge>,
    state: SessionState,
}

impl BalanceTracker {
    pub fn new(bridge: Arc<dyn ProviderBridge>, state: SessionState) -> Self {
        Self { bridge, state }
    }

    /// Re-fetch the balance of `address` and commit it if still active.
    ///
    /// A no-op returning the cached value when `address` is empty. On fetch
    /// failure the cached value is retained and `BalanceFetchFailed` is
    /// returned; callers on the connect and confirmation paths log it and
    /// continue.
    pub async fn refresh(&self, address: &str) -> WalletResult<String> {
        if address.is_empty() {
            return Ok(self.state.snapshot().balance);
        }

        match self.bridge.get_balance(address).await {
            Ok(balance) => {
                if self.state.set_balance_if_active(address, &balance) {
                    tracing::debug!(address = %address, balance = %balance, "balance refreshed");
                    Ok(balance)
                } else {
                    tracing::debug!(
                        address = %address,
                        "discarding balance fetched for an inactive address"
                    );
                    Ok(self.state.snapshot().balance)
                }
            }
            Err(e) => Err(match e {
                WalletError::BalanceFetchFailed(_) => e,
                other => WalletError::BalanceFetchFailed(other.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::provider::{ContractCall, PendingTransaction};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FixedBridge {
        balance: String,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ProviderBridge for FixedBridge {
        async fn connect(&self) -> WalletResult<String> {
            unimplemented!()
        }
        async fn disconnect(&self) -> WalletResult<()> {
            unimplemented!()
        }
        async fn get_balance(&self, _address: &str) -> WalletResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.balance.clone())
        }
        async fn submit(&self, _call: ContractCall) -> WalletResult<PendingTransaction> {
            unimplemented!()
        }
        async fn await_confirmation(&self, _pending: &PendingTransaction) -> WalletResult<()> {
            unimplemented!()
        }
        async fn contract_balance(&self) -> WalletResult<String> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn test_empty_address_is_a_noop() {
        let bridge = Arc::new(FixedBridge {
            balance: "42".to_string(),
            calls: AtomicU32::new(0),
        });
        let state = SessionState::new();
        let tracker = BalanceTracker::new(bridge.clone(), state);

        assert_eq!(tracker.refresh("").await.unwrap(), "0");
        assert_eq!(bridge.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_commits_for_active_address() {
        let bridge = Arc::new(FixedBridge {
            balance: "2.5".to_string(),
            calls: AtomicU32::new(0),
        });
        let state = SessionState::new();
        state.set_connected("0xA");
        let tracker = BalanceTracker::new(bridge, state.clone());

        assert_eq!(tracker.refresh("0xA").await.unwrap(), "2.5");
        assert_eq!(state.snapshot().balance, "2.5");
    }

    #[tokio::test]
    async fn test_discards_for_inactive_address() {
        let bridge = Arc::new(FixedBridge {
            balance: "9.9".to_string(),
            calls: AtomicU32::new(0),
        });
        let state = SessionState::new();
        state.set_connected("0xA");
        state.set_balance_if_active("0xA", "2.5");
        let tracker = BalanceTracker::new(bridge, state.clone());

        // Fetch completes for an address that is no longer active.
        assert_eq!(tracker.refresh("0xB").await.unwrap(), "2.5");
        assert_eq!(state.snapshot().balance, "2.5");
    }
}
