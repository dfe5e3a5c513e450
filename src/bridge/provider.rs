//! Bridge contract to the external signing agent.

use async_trait::async_trait;

use crate::error::WalletResult;

/// A submission the bridge can marshal to the signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    /// SmartWallet `transfer(to, amount)`; amount in display units.
    Transfer { to: String, amount: String },
    /// SmartWallet `purchaseItem(itemId)`.
    PurchaseItem { item_id: u64 },
    /// SmartWallet `associateWallet(identity)`, payable with `fee` display units.
    AssociateWallet { identity: String, fee: String },
}

/// A transaction accepted by the signer but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    /// On-chain transaction hash.
    pub tx_hash: String,
}

/// Boundary to the external key-holding agent.
///
/// Implementations marshal requests to the signer and decode its responses;
/// no business logic lives behind this trait. `get_balance`, `submit` and
/// `contract_balance` fail with `NotConnected` while no session is active.
#[async_trait]
pub trait ProviderBridge: Send + Sync {
    /// Run the request-accounts handshake and return the active address.
    async fn connect(&self) -> WalletResult<String>;

    /// Tear down the session and clear any cached signer state.
    async fn disconnect(&self) -> WalletResult<()>;

    /// Native balance of `address`, in display units.
    async fn get_balance(&self, address: &str) -> WalletResult<String>;

    /// Submit a transaction; returns as soon as the signer accepts it.
    async fn submit(&self, call: ContractCall) -> WalletResult<PendingTransaction>;

    /// Wait until `pending` reaches the configured confirmation depth.
    async fn await_confirmation(&self, pending: &PendingTransaction) -> WalletResult<()>;

    /// Custody balance held by the smart-wallet contract, in display units.
    async fn contract_balance(&self) -> WalletResult<String>;
}
