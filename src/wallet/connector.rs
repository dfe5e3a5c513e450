//! Wallet connection state machine.
//!
//! # Responsibilities
//! - Own the Disconnected → Connecting → Connected lifecycle
//! - Keep transitions exclusive: at most one connect/disconnect in flight
//! - Order the side effects of a transition: auth-session sync first,
//!   balance priming after
//!
//! # Design Decisions
//! - Overlapping transitions are rejected immediately with
//!   `ConnectionInProgress` instead of queued; callers are never blocked
//!   behind someone else's handshake
//! - A connect whose auth-session write fails is rolled back hard: the
//!   bridge session is torn down and the state lands in `Error`, so the
//!   wallet and auth stores never silently disagree

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::balance::BalanceTracker;
use crate::bridge::provider::ProviderBridge;
use crate::error::{WalletError, WalletResult};
use crate::session::sync::SessionSync;
use crate::wallet::state::{ConnectionState, SessionState};

/// Owner of the single wallet connection lifecycle.
pub struct WalletConnector {
    bridge: Arc<dyn ProviderBridge>,
    state: SessionState,
    sync: SessionSync,
    balance: Arc<BalanceTracker>,
    /// Held across a transition; `try_lock` failure means one is in flight.
    transition: Mutex<()>,
}

impl WalletConnector {
    pub fn new(
        bridge: Arc<dyn ProviderBridge>,
        state: SessionState,
        sync: SessionSync,
        balance: Arc<BalanceTracker>,
    ) -> Self {
        Self {
            bridge,
            state,
            sync,
            balance,
            transition: Mutex::new(()),
        }
    }

    /// Establish a wallet session and return the active address.
    ///
    /// Idempotent while connected: returns the existing address without a
    /// second handshake. Rejects with `ConnectionInProgress` while another
    /// transition is in flight.
    pub async fn connect(&self) -> WalletResult<String> {
        let _guard = self
            .transition
            .try_lock()
            .map_err(|_| WalletError::ConnectionInProgress)?;

        let snapshot = self.state.snapshot();
        if snapshot.connection == ConnectionState::Connected {
            tracing::debug!(address = %snapshot.address, "connect: session already active");
            return Ok(snapshot.address);
        }

        self.state.set_connecting();
        let address = match self.bridge.connect().await {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!(error = %e, "wallet handshake failed");
                self.state.fail_connecting(&e.to_string());
                return Err(e);
            }
        };

        // The auth session must reflect the address before connect returns.
        if let Err(e) = self.sync.set_address(&address).await {
            tracing::error!(error = %e, "auth-session write failed, rolling back connect");
            if let Err(teardown) = self.bridge.disconnect().await {
                tracing::warn!(error = %teardown, "bridge teardown failed during rollback");
            }
            self.state.set_error_state(&e.to_string());
            return Err(e);
        }

        self.state.set_connected(&address);
        tracing::info!(address = %address, "wallet connected");

        // Prime the balance; a fetch failure does not fail the connect.
        if let Err(e) = self.balance.refresh(&address).await {
            tracing::warn!(error = %e, "initial balance fetch failed");
            self.state.record_error(&e.to_string());
        }

        Ok(address)
    }

    /// Tear down the wallet session.
    ///
    /// Idempotent, and always resets local state: a failing bridge teardown
    /// is logged, not propagated. An auth-session clear failure is returned
    /// after the local reset so the caller knows the stores may disagree.
    pub async fn disconnect(&self) -> WalletResult<()> {
        let _guard = self
            .transition
            .try_lock()
            .map_err(|_| WalletError::ConnectionInProgress)?;

        if self.state.snapshot().connection == ConnectionState::Disconnected {
            return Ok(());
        }

        if let Err(e) = self.bridge.disconnect().await {
            tracing::warn!(error = %e, "bridge disconnect failed, resetting local state anyway");
        }

        let sync_result = self.sync.clear_address().await;
        self.state.set_disconnected();

        match sync_result {
            Ok(()) => {
                tracing::info!("wallet disconnected");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "auth-session clear failed after disconnect");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for WalletConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConnector")
            .field("session", &self.state.snapshot())
            .finish()
    }
}
