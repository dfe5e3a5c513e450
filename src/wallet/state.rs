//! Observable wallet session state.
//!
//! # Responsibilities
//! - Hold the single process-wide WalletSession snapshot
//! - Serialize all mutations through one watch channel
//! - Let any consumer (UI or test) observe changes without polling
//!
//! # Design Decisions
//! - The state handle is explicit and injectable, created at application
//!   start and passed to the components that need it; there is no hidden
//!   global accessor
//! - Mutators are crate-private: WalletConnector, BalanceTracker and
//!   TransactionSubmitter are the only writers; everyone else reads

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Lifecycle of the single wallet connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No session; address and balance are empty.
    Disconnected,
    /// A connect handshake is in flight.
    Connecting,
    /// A session is active; address is non-empty.
    Connected,
    /// The session was forced down after an auth-sync failure.
    Error,
}

/// Snapshot of the wallet session, as exposed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    /// Connection lifecycle state.
    pub connection: ConnectionState,
    /// Active account address; empty unless connected.
    pub address: String,
    /// Cached native balance in display units.
    pub balance: String,
    /// Last user-facing error message; empty when none.
    pub error: String,
}

impl WalletSession {
    /// The reset state: no session, zero balance, no error.
    pub fn disconnected() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            address: String::new(),
            balance: "0".to_string(),
            error: String::new(),
        }
    }

    /// True while a connect handshake is in flight.
    pub fn is_connecting(&self) -> bool {
        self.connection == ConnectionState::Connecting
    }

    /// True while a session is active.
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// Injectable handle to the shared wallet session.
///
/// Cloning shares the underlying channel; every clone observes and mutates
/// the same session.
#[derive(Clone)]
pub struct SessionState {
    tx: Arc<watch::Sender<WalletSession>>,
}

impl SessionState {
    /// Create a fresh, disconnected session state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(WalletSession::disconnected());
        Self { tx: Arc::new(tx) }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> WalletSession {
        self.tx.borrow().clone()
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<WalletSession> {
        self.tx.subscribe()
    }

    /// Enter the Connecting state, clearing any previous error.
    pub(crate) fn set_connecting(&self) {
        self.tx.send_modify(|s| {
            s.connection = ConnectionState::Connecting;
            s.error.clear();
        });
    }

    /// Commit a successful handshake.
    pub(crate) fn set_connected(&self, address: &str) {
        self.tx.send_modify(|s| {
            s.connection = ConnectionState::Connected;
            s.address = address.to_string();
            s.error.clear();
        });
    }

    /// Abort a connect attempt: back to Disconnected with the error surfaced.
    pub(crate) fn fail_connecting(&self, message: &str) {
        self.tx.send_modify(|s| {
            s.connection = ConnectionState::Disconnected;
            s.address.clear();
            s.error = message.to_string();
        });
    }

    /// Force the session down after an auth-sync failure.
    pub(crate) fn set_error_state(&self, message: &str) {
        self.tx.send_modify(|s| {
            s.connection = ConnectionState::Error;
            s.address.clear();
            s.balance = "0".to_string();
            s.error = message.to_string();
        });
    }

    /// Reset to the disconnected state.
    pub(crate) fn set_disconnected(&self) {
        self.tx.send_modify(|s| *s = WalletSession::disconnected());
    }

    /// Commit a fetched balance, but only if `address` is still the active
    /// account. Returns whether the value was committed; stale fetches for a
    /// previous address are discarded.
    pub(crate) fn set_balance_if_active(&self, address: &str, balance: &str) -> bool {
        let mut committed = false;
        self.tx.send_modify(|s| {
            if s.connection == ConnectionState::Connected && s.address == address {
                s.balance = balance.to_string();
                committed = true;
            }
        });
        committed
    }

    /// Surface an error message without changing the connection state.
    pub(crate) fn record_error(&self, message: &str) {
        self.tx.send_modify(|s| s.error = message.to_string());
    }

    /// Clear the surfaced error message.
    pub(crate) fn clear_error(&self) {
        self.tx.send_modify(|s| s.error.clear());
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("session", &self.snapshot())
            .finish()
    }
}
