//! Shared test doubles for the integration suite.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use wallet_session::{
    ContractCall, MemorySessionStore, PendingTransaction, ProviderBridge, SessionStore,
    WalletConfig, WalletError, WalletResult, WalletService,
};

/// Scripted signer bridge with call counters and gates for overlap tests.
pub struct MockBridge {
    address: String,
    connected: AtomicBool,
    pub connect_calls: AtomicU32,
    pub disconnect_calls: AtomicU32,
    pub balance_calls: AtomicU32,
    pub submit_calls: AtomicU32,
    pub submitted: Mutex<Vec<ContractCall>>,
    balance: Mutex<String>,
    connect_error: Mutex<Option<WalletError>>,
    balance_error: Mutex<Option<WalletError>>,
    submit_error: Mutex<Option<WalletError>>,
    confirm_error: Mutex<Option<WalletError>>,
    fail_disconnect: AtomicBool,
    connect_gate: Mutex<Option<Arc<Notify>>>,
    confirm_gates: Mutex<HashMap<String, Arc<Notify>>>,
    next_tx: AtomicU32,
}

impl MockBridge {
    pub fn new(address: &str, balance: &str) -> Arc<Self> {
        Arc::new(Self {
            address: address.to_string(),
            connected: AtomicBool::new(false),
            connect_calls: AtomicU32::new(0),
            disconnect_calls: AtomicU32::new(0),
            balance_calls: AtomicU32::new(0),
            submit_calls: AtomicU32::new(0),
            submitted: Mutex::new(Vec::new()),
            balance: Mutex::new(balance.to_string()),
            connect_error: Mutex::new(None),
            balance_error: Mutex::new(None),
            submit_error: Mutex::new(None),
            confirm_error: Mutex::new(None),
            fail_disconnect: AtomicBool::new(false),
            connect_gate: Mutex::new(None),
            confirm_gates: Mutex::new(HashMap::new()),
            next_tx: AtomicU32::new(0),
        })
    }

    /// Value returned by subsequent balance fetches.
    pub fn set_balance(&self, balance: &str) {
        *self.balance.lock().unwrap() = balance.to_string();
    }

    pub fn fail_next_connect(&self, error: WalletError) {
        *self.connect_error.lock().unwrap() = Some(error);
    }

    pub fn fail_next_balance(&self, error: WalletError) {
        *self.balance_error.lock().unwrap() = Some(error);
    }

    pub fn fail_next_submit(&self, error: WalletError) {
        *self.submit_error.lock().unwrap() = Some(error);
    }

    pub fn fail_next_confirm(&self, error: WalletError) {
        *self.confirm_error.lock().unwrap() = Some(error);
    }

    pub fn fail_disconnect(&self) {
        self.fail_disconnect.store(true, Ordering::SeqCst);
    }

    /// Hold every connect call until the returned gate is notified.
    pub fn gate_connect(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.connect_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Hold the confirmation of `tx_hash` until the returned gate is
    /// notified. Submitted transactions hash to "0xtx-1", "0xtx-2", ….
    pub fn gate_confirmation(&self, tx_hash: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.confirm_gates
            .lock()
            .unwrap()
            .insert(tx_hash.to_string(), gate.clone());
        gate
    }
}

#[async_trait]
impl ProviderBridge for MockBridge {
    async fn connect(&self) -> WalletResult<String> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.connect_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(error) = self.connect_error.lock().unwrap().take() {
            return Err(error);
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(self.address.clone())
    }

    async fn disconnect(&self) -> WalletResult<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(WalletError::ConnectionFailed(
                "signer cache clear failed".to_string(),
            ));
        }
        Ok(())
    }

    async fn get_balance(&self, _address: &str) -> WalletResult<String> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(WalletError::NotConnected);
        }
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.balance_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.balance.lock().unwrap().clone())
    }

    async fn submit(&self, call: ContractCall) -> WalletResult<PendingTransaction> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(WalletError::NotConnected);
        }
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.submit_error.lock().unwrap().take() {
            return Err(error);
        }
        self.submitted.lock().unwrap().push(call);
        let n = self.next_tx.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PendingTransaction {
            tx_hash: format!("0xtx-{}", n),
        })
    }

    async fn await_confirmation(&self, pending: &PendingTransaction) -> WalletResult<()> {
        let gate = self
            .confirm_gates
            .lock()
            .unwrap()
            .get(&pending.tx_hash)
            .cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(error) = self.confirm_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(())
    }

    async fn contract_balance(&self) -> WalletResult<String> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(WalletError::NotConnected);
        }
        Ok(self.balance.lock().unwrap().clone())
    }
}

/// Auth store whose writes always fail.
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn wallet_address(&self, _user_id: &str) -> WalletResult<String> {
        Ok(String::new())
    }

    async fn set_wallet_address(&self, _user_id: &str, _address: &str) -> WalletResult<()> {
        Err(WalletError::SessionSyncFailed(
            "auth store unavailable".to_string(),
        ))
    }
}

/// Service wired to the given doubles with default configuration.
pub fn service_with(
    bridge: Arc<MockBridge>,
    store: Arc<dyn SessionStore>,
) -> WalletService {
    WalletService::new(bridge, store, &WalletConfig::default())
}

/// Service plus the memory store it syncs into.
pub fn service_and_store(bridge: Arc<MockBridge>) -> (WalletService, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let service = service_with(bridge, store.clone());
    (service, store)
}

/// The user id the default configuration syncs under.
pub fn default_user() -> &'static str {
    "default"
}
