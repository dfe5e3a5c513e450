//! Propagates the active wallet address into the auth session.
//!
//! Writes are awaited inside connect/disconnect before either operation is
//! considered complete, so an observer reading the auth session right after
//! a transition always sees a consistent value.

use std::sync::Arc;

use crate::error::{WalletError, WalletResult};
use crate::session::store::SessionStore;

/// Single writer of the auth session's `wallet_address` field.
pub struct SessionSync {
    store: Arc<dyn SessionStore>,
    user_id: String,
}

impl SessionSync {
    pub fn new(store: Arc<dyn SessionStore>, user_id: String) -> Self {
        Self { store, user_id }
    }

    /// Bind `address` to the configured user.
    pub async fn set_address(&self, address: &str) -> WalletResult<()> {
        self.write(address).await
    }

    /// Clear the binding for the configured user.
    pub async fn clear_address(&self) -> WalletResult<()> {
        self.write("").await
    }

    /// Address currently recorded in the auth session.
    pub async fn current_address(&self) -> WalletResult<String> {
        self.store.wallet_address(&self.user_id).await
    }

    async fn write(&self, address: &str) -> WalletResult<()> {
        self.store
            .set_wallet_address(&self.user_id, address)
            .await
            .map_err(|e| match e {
                WalletError::SessionSyncFailed(_) => e,
                other => WalletError::SessionSyncFailed(other.to_string()),
            })
    }
}

impl std::fmt::Debug for SessionSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSync")
            .field("user_id", &self.user_id)
            .finish()
    }
}
