//! Transaction submission pipeline.
//!
//! # Responsibilities
//! - Check preconditions synchronously: active session, valid amount
//! - Dispatch each submission on its own task: submit → await
//!   confirmation → refresh balance
//! - Resolve an independent handle per submission
//!
//! # Design Decisions
//! - Multiple submissions may be in flight at once; the refresh after each
//!   confirmation always re-fetches, so the last completed fetch wins and
//!   no balance is ever computed locally from a sent amount
//! - A failed submission or confirmation resolves the handle with
//!   `confirmed = false` and performs no refresh

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::balance::BalanceTracker;
use crate::bridge::provider::{ContractCall, ProviderBridge};
use crate::bridge::units;
use crate::error::{WalletError, WalletResult};
use crate::wallet::state::{ConnectionState, SessionState};

/// A value transfer in native display units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Recipient address.
    pub to: String,
    /// Amount in display units; must be a positive decimal.
    pub amount: String,
}

/// Terminal outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    /// On-chain transaction hash; empty if submission never reached the chain.
    pub transaction_id: String,
    /// Whether the transaction reached the configured confirmation depth.
    pub confirmed: bool,
    /// Populated when the submission or confirmation failed.
    pub error: Option<String>,
}

/// Handle to an in-flight submission.
///
/// Returned immediately on dispatch; resolves once the transaction confirms
/// or fails. Dropping the handle does not cancel the submission.
#[derive(Debug)]
pub struct TransactionHandle {
    submission_id: Uuid,
    rx: oneshot::Receiver<TransactionResult>,
}

impl TransactionHandle {
    /// Identifier of this submission, independent of the on-chain hash.
    pub fn submission_id(&self) -> Uuid {
        self.submission_id
    }

    /// Wait for the terminal result of the submission.
    pub async fn resolved(self) -> TransactionResult {
        self.rx.await.unwrap_or_else(|_| TransactionResult {
            transaction_id: String::new(),
            confirmed: false,
            error: Some("submission task dropped before resolving".to_string()),
        })
    }
}

/// Dispatches transactions against the connected account.
pub struct TransactionSubmitter {
    bridge: Arc<dyn ProviderBridge>,
    state: SessionState,
    balance: Arc<BalanceTracker>,
    /// Fee attached to `associateWallet`, in display units.
    association_fee: String,
}

impl TransactionSubmitter {
    pub fn new(
        bridge: Arc<dyn ProviderBridge>,
        state: SessionState,
        balance: Arc<BalanceTracker>,
        association_fee: String,
    ) -> Self {
        Self {
            bridge,
            state,
            balance,
            association_fee,
        }
    }

    /// Submit a transfer. The amount is validated here and never reaches
    /// the bridge when zero, negative, or not a decimal.
    pub fn send(&self, request: TransferRequest) -> WalletResult<TransactionHandle> {
        self.require_connected()?;
        units::validate_amount(&request.amount)?;
        Ok(self.dispatch(ContractCall::Transfer {
            to: request.to,
            amount: request.amount,
        }))
    }

    /// Submit a `purchaseItem` contract call.
    pub fn purchase_item(&self, item_id: u64) -> WalletResult<TransactionHandle> {
        self.require_connected()?;
        Ok(self.dispatch(ContractCall::PurchaseItem { item_id }))
    }

    /// Submit an `associateWallet` call carrying the configured fee.
    pub fn associate_wallet(&self, identity: &str) -> WalletResult<TransactionHandle> {
        self.require_connected()?;
        Ok(self.dispatch(ContractCall::AssociateWallet {
            identity: identity.to_string(),
            fee: self.association_fee.clone(),
        }))
    }

    fn require_connected(&self) -> WalletResult<()> {
        if self.state.snapshot().connection != ConnectionState::Connected {
            return Err(WalletError::NotConnected);
        }
        Ok(())
    }

    fn dispatch(&self, call: ContractCall) -> TransactionHandle {
        let submission_id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();

        self.state.clear_error();
        let address = self.state.snapshot().address;
        let bridge = self.bridge.clone();
        let state = self.state.clone();
        let balance = self.balance.clone();

        tracing::info!(submission_id = %submission_id, call = ?call, "dispatching transaction");
        tokio::spawn(async move {
            let result =
                run_submission(bridge, state, balance, address, call, submission_id).await;
            let _ = tx.send(result);
        });

        TransactionHandle { submission_id, rx }
    }
}

async fn run_submission(
    bridge: Arc<dyn ProviderBridge>,
    state: SessionState,
    balance: Arc<BalanceTracker>,
    address: String,
    call: ContractCall,
    submission_id: Uuid,
) -> TransactionResult {
    let pending = match bridge.submit(call).await {
        Ok(pending) => pending,
        Err(e) => {
            tracing::warn!(submission_id = %submission_id, error = %e, "submission failed");
            state.record_error(&e.to_string());
            return TransactionResult {
                transaction_id: String::new(),
                confirmed: false,
                error: Some(e.to_string()),
            };
        }
    };

    match bridge.await_confirmation(&pending).await {
        Ok(()) => {
            if let Err(e) = balance.refresh(&address).await {
                tracing::warn!(
                    submission_id = %submission_id,
                    error = %e,
                    "post-confirmation balance fetch failed"
                );
            }
            tracing::info!(
                submission_id = %submission_id,
                tx_hash = %pending.tx_hash,
                "transaction confirmed"
            );
            TransactionResult {
                transaction_id: pending.tx_hash,
                confirmed: true,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(
                submission_id = %submission_id,
                tx_hash = %pending.tx_hash,
                error = %e,
                "confirmation failed"
            );
            state.record_error(&e.to_string());
            TransactionResult {
                transaction_id: pending.tx_hash,
                confirmed: false,
                error: Some(e.to_string()),
            }
        }
    }
}

impl std::fmt::Debug for TransactionSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionSubmitter")
            .field("association_fee", &self.association_fee)
            .finish()
    }
}
