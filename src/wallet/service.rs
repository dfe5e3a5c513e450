//! Observable wallet service facade.
//!
//! Composes the bridge, connector, balance tracker, transaction submitter
//! and session sync into the surface a UI (or test) drives: a snapshot plus
//! subscription for state, and callable actions returning eventual results.

use std::sync::Arc;

use tokio::sync::watch;

use crate::balance::BalanceTracker;
use crate::bridge::provider::ProviderBridge;
use crate::config::WalletConfig;
use crate::error::WalletResult;
use crate::session::store::SessionStore;
use crate::session::sync::SessionSync;
use crate::tx::submitter::{TransactionHandle, TransactionSubmitter, TransferRequest};
use crate::wallet::connector::WalletConnector;
use crate::wallet::state::{SessionState, WalletSession};

/// The exposed surface of the wallet subsystem.
pub struct WalletService {
    state: SessionState,
    connector: WalletConnector,
    submitter: TransactionSubmitter,
    bridge: Arc<dyn ProviderBridge>,
}

impl WalletService {
    /// Wire the subsystem together around a bridge and an auth-session
    /// store. The session state is created here and owned by the service.
    pub fn new(
        bridge: Arc<dyn ProviderBridge>,
        store: Arc<dyn SessionStore>,
        config: &WalletConfig,
    ) -> Self {
        let state = SessionState::new();
        let balance = Arc::new(BalanceTracker::new(bridge.clone(), state.clone()));
        let sync = SessionSync::new(store, config.auth.user_id.clone());
        let connector = WalletConnector::new(
            bridge.clone(),
            state.clone(),
            sync,
            balance.clone(),
        );
        let submitter = TransactionSubmitter::new(
            bridge.clone(),
            state.clone(),
            balance,
            config.contract.association_fee.clone(),
        );

        Self {
            state,
            connector,
            submitter,
            bridge,
        }
    }

    /// Current observable state: address, balance, connecting flag, error.
    pub fn snapshot(&self) -> WalletSession {
        self.state.snapshot()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<WalletSession> {
        self.state.subscribe()
    }

    /// Establish the wallet session; returns the active address.
    pub async fn connect(&self) -> WalletResult<String> {
        self.connector.connect().await
    }

    /// Tear down the wallet session.
    pub async fn disconnect(&self) -> WalletResult<()> {
        self.connector.disconnect().await
    }

    /// Submit a transfer of `amount` display units to `to`.
    pub fn send_transaction(&self, to: &str, amount: &str) -> WalletResult<TransactionHandle> {
        self.submitter.send(TransferRequest {
            to: to.to_string(),
            amount: amount.to_string(),
        })
    }

    /// Purchase an item through the smart wallet.
    pub fn purchase_item(&self, item_id: u64) -> WalletResult<TransactionHandle> {
        self.submitter.purchase_item(item_id)
    }

    /// Associate the connected wallet with an identity, paying the
    /// configured association fee.
    pub fn associate_wallet(&self, identity: &str) -> WalletResult<TransactionHandle> {
        self.submitter.associate_wallet(identity)
    }

    /// Custody balance held by the smart-wallet contract.
    pub async fn contract_balance(&self) -> WalletResult<String> {
        self.bridge.contract_balance().await
    }
}

impl std::fmt::Debug for WalletService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletService")
            .field("session", &self.state.snapshot())
            .finish()
    }
}
