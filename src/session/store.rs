//! Auth-session store boundary.
//!
//! The application-level session record is externally owned; this crate
//! reads and writes exactly one field of it, `wallet_address`, and makes no
//! assumption about the rest of its shape.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{WalletError, WalletResult};

/// External auth-session store, keyed by a logical user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Wallet address bound to `user_id`; empty when unbound.
    async fn wallet_address(&self, user_id: &str) -> WalletResult<String>;

    /// Bind `address` to `user_id`, overwriting any previous binding. An
    /// empty `address` clears the binding.
    async fn set_wallet_address(&self, user_id: &str, address: &str) -> WalletResult<()>;
}

/// In-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn wallet_address(&self, user_id: &str) -> WalletResult<String> {
        let records = self
            .records
            .read()
            .map_err(|_| WalletError::SessionSyncFailed("session store lock poisoned".to_string()))?;
        Ok(records.get(user_id).cloned().unwrap_or_default())
    }

    async fn set_wallet_address(&self, user_id: &str, address: &str) -> WalletResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| WalletError::SessionSyncFailed("session store lock poisoned".to_string()))?;
        records.insert(user_id.to_string(), address.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unbound_user_reads_empty() {
        let store = MemorySessionStore::new();
        assert_eq!(store.wallet_address("alice").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_bind_and_clear() {
        let store = MemorySessionStore::new();
        store.set_wallet_address("alice", "0xABC").await.unwrap();
        assert_eq!(store.wallet_address("alice").await.unwrap(), "0xABC");

        store.set_wallet_address("alice", "").await.unwrap();
        assert_eq!(store.wallet_address("alice").await.unwrap(), "");
    }
}
