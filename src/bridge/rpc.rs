//! RPC-backed signer bridge with timeout and error classification.
//!
//! # Responsibilities
//! - Run the request-accounts handshake against a wallet-enabled endpoint
//! - Verify the endpoint's chain ID against the configured network
//! - Query native and contract balances
//! - Submit node-signed transactions and poll for confirmation
//!
//! The remote endpoint holds the keys and signs; this bridge never sees
//! private key material.

use std::sync::Arc;
use std::time::Duration;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{interval, timeout};

use crate::bridge::contract;
use crate::bridge::provider::{ContractCall, PendingTransaction, ProviderBridge};
use crate::bridge::units;
use crate::config::schema::NetworkConfig;
use crate::config::WalletConfig;
use crate::error::{WalletError, WalletResult};

/// Bridge to an external signer reachable over JSON-RPC.
pub struct RpcBridge {
    /// Underlying RPC provider.
    provider: Arc<dyn Provider + Send + Sync>,
    /// Network the bridge is pinned to.
    network: NetworkConfig,
    /// Deployed SmartWallet contract, when configured.
    contract_address: Option<Address>,
    /// Per-call RPC timeout.
    timeout_duration: Duration,
    /// Account of the active session, if any.
    account: Mutex<Option<Address>>,
}

impl RpcBridge {
    /// Build a bridge from validated configuration.
    ///
    /// No network traffic happens here; the handshake (including chain-id
    /// verification) runs in `connect`.
    pub fn new(config: &WalletConfig) -> WalletResult<Self> {
        let rpc_url: url::Url = config.network.rpc_url.parse().map_err(|e| {
            WalletError::ConnectionFailed(format!(
                "invalid RPC URL '{}': {}",
                config.network.rpc_url, e
            ))
        })?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(rpc_url))
            as Arc<dyn Provider + Send + Sync>;

        let contract_address = if config.contract.address.is_empty() {
            None
        } else {
            Some(config.contract.address.parse().map_err(|e| {
                WalletError::ConnectionFailed(format!(
                    "invalid contract address '{}': {}",
                    config.contract.address, e
                ))
            })?)
        };

        Ok(Self {
            provider,
            network: config.network.clone(),
            contract_address,
            timeout_duration: Duration::from_secs(config.network.rpc_timeout_secs),
            account: Mutex::new(None),
        })
    }

    /// Active account, or `NotConnected`.
    async fn require_session(&self) -> WalletResult<Address> {
        (*self.account.lock().await).ok_or(WalletError::NotConnected)
    }

    fn contract_address(&self) -> WalletResult<Address> {
        self.contract_address.ok_or_else(|| {
            WalletError::TransactionRejected(
                "smart-wallet contract address is not configured".to_string(),
            )
        })
    }
}

#[async_trait]
impl ProviderBridge for RpcBridge {
    async fn connect(&self) -> WalletResult<String> {
        let chain_id = timeout(self.timeout_duration, self.provider.get_chain_id())
            .await
            .map_err(|_| {
                WalletError::ConnectionFailed(format!(
                    "chain id query timed out after {}s",
                    self.network.rpc_timeout_secs
                ))
            })?
            .map_err(|e| WalletError::ConnectionFailed(format!("chain id query failed: {}", e)))?;
        if chain_id != self.network.chain_id {
            return Err(WalletError::ConnectionFailed(format!(
                "chain id mismatch: expected {}, endpoint reports {}",
                self.network.chain_id, chain_id
            )));
        }

        let accounts = timeout(self.timeout_duration, self.provider.get_accounts())
            .await
            .map_err(|_| {
                WalletError::ConnectionFailed(format!(
                    "accounts handshake timed out after {}s",
                    self.network.rpc_timeout_secs
                ))
            })?
            .map_err(classify_handshake_error)?;
        let account = accounts.first().copied().ok_or_else(|| {
            WalletError::ConnectionRejected("signer exposed no accounts".to_string())
        })?;

        *self.account.lock().await = Some(account);
        tracing::info!(
            address = %account,
            chain_id = chain_id,
            network = %self.network.name,
            "wallet session established"
        );
        Ok(account.to_string())
    }

    async fn disconnect(&self) -> WalletResult<()> {
        // Clears the cached session; there is no remote teardown call.
        let previous = self.account.lock().await.take();
        if let Some(account) = previous {
            tracing::info!(address = %account, "wallet session cleared");
        }
        Ok(())
    }

    async fn get_balance(&self, address: &str) -> WalletResult<String> {
        self.require_session().await?;
        let address: Address = address.parse().map_err(|e| {
            WalletError::BalanceFetchFailed(format!("invalid address '{}': {}", address, e))
        })?;
        let wei = timeout(self.timeout_duration, self.provider.get_balance(address))
            .await
            .map_err(|_| {
                WalletError::BalanceFetchFailed(format!(
                    "balance query timed out after {}s",
                    self.network.rpc_timeout_secs
                ))
            })?
            .map_err(|e| WalletError::BalanceFetchFailed(format!("balance query failed: {}", e)))?;
        Ok(units::format_wei(wei))
    }

    async fn submit(&self, call: ContractCall) -> WalletResult<PendingTransaction> {
        let from = self.require_session().await?;
        let to = self.contract_address()?;

        let (input, value) = match call {
            ContractCall::Transfer { to: recipient, amount } => {
                let recipient: Address = recipient.parse().map_err(|e| {
                    WalletError::TransactionRejected(format!(
                        "invalid recipient '{}': {}",
                        recipient, e
                    ))
                })?;
                let wei = units::parse_display(&amount)?;
                (contract::transfer_calldata(recipient, wei), U256::ZERO)
            }
            ContractCall::PurchaseItem { item_id } => (
                contract::purchase_item_calldata(U256::from(item_id)),
                U256::ZERO,
            ),
            ContractCall::AssociateWallet { identity, fee } => (
                contract::associate_wallet_calldata(&identity),
                units::parse_display(&fee)?,
            ),
        };

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(value)
            .with_input(input);

        let pending = timeout(self.timeout_duration, self.provider.send_transaction(tx))
            .await
            .map_err(|_| {
                WalletError::TransactionRejected(format!(
                    "submission timed out after {}s",
                    self.network.rpc_timeout_secs
                ))
            })?
            .map_err(classify_submit_error)?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "transaction submitted");
        Ok(PendingTransaction {
            tx_hash: tx_hash.to_string(),
        })
    }

    async fn await_confirmation(&self, pending: &PendingTransaction) -> WalletResult<()> {
        let tx_hash: TxHash = pending.tx_hash.parse().map_err(|e| {
            WalletError::TransactionRejected(format!(
                "invalid transaction hash '{}': {}",
                pending.tx_hash, e
            ))
        })?;
        let required = self.network.confirmation_blocks as u64;
        let window = Duration::from_secs(self.network.confirmation_timeout_secs);
        let poll_interval = Duration::from_secs(2);

        let result = timeout(window, async {
            let mut ticker = interval(poll_interval);
            loop {
                ticker.tick().await;

                let receipt = match timeout(
                    self.timeout_duration,
                    self.provider.get_transaction_receipt(tx_hash),
                )
                .await
                {
                    Ok(Ok(Some(r))) => r,
                    Ok(Ok(None)) => {
                        tracing::debug!(tx_hash = %tx_hash, "transaction pending");
                        continue;
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(tx_hash = %tx_hash, error = %e, "receipt query failed");
                        continue;
                    }
                    Err(_) => {
                        tracing::warn!(tx_hash = %tx_hash, "receipt query timed out");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(WalletError::TransactionReverted(
                        "transaction reverted on-chain".to_string(),
                    ));
                }

                let current = match timeout(
                    self.timeout_duration,
                    self.provider.get_block_number(),
                )
                .await
                {
                    Ok(Ok(n)) => n,
                    _ => continue,
                };
                let tx_block = receipt.block_number.unwrap_or(current);
                let confirmations = current.saturating_sub(tx_block);
                if confirmations >= required {
                    tracing::info!(
                        tx_hash = %tx_hash,
                        block_number = tx_block,
                        "transaction confirmed"
                    );
                    return Ok(());
                }
                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required,
                    "waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(WalletError::ConfirmationTimeout(
                self.network.confirmation_timeout_secs,
            )),
        }
    }

    async fn contract_balance(&self) -> WalletResult<String> {
        let from = self.require_session().await?;
        let to = self.contract_address.ok_or_else(|| {
            WalletError::BalanceFetchFailed(
                "smart-wallet contract address is not configured".to_string(),
            )
        })?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_input(contract::balance_calldata());

        let call = self.provider.call(tx);
        let output = timeout(self.timeout_duration, async { call.await })
            .await
            .map_err(|_| {
                WalletError::BalanceFetchFailed(format!(
                    "contract balance query timed out after {}s",
                    self.network.rpc_timeout_secs
                ))
            })?
            .map_err(|e| {
                WalletError::BalanceFetchFailed(format!("contract balance query failed: {}", e))
            })?;

        let wei = contract::decode_balance(&output).map_err(WalletError::BalanceFetchFailed)?;
        Ok(units::format_wei(wei))
    }
}

/// Classify a handshake failure from the signer endpoint.
fn classify_handshake_error(e: impl std::fmt::Display) -> WalletError {
    let message = e.to_string();
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("rejected") || lowered.contains("denied") {
        WalletError::ConnectionRejected(message)
    } else {
        WalletError::ConnectionFailed(message)
    }
}

/// Classify a submission failure from the signer endpoint.
fn classify_submit_error(e: impl std::fmt::Display) -> WalletError {
    let message = e.to_string();
    if message.to_ascii_lowercase().contains("revert") {
        WalletError::TransactionReverted(message)
    } else {
        WalletError::TransactionRejected(message)
    }
}

impl std::fmt::Debug for RpcBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcBridge")
            .field("rpc_url", &self.network.rpc_url)
            .field("chain_id", &self.network.chain_id)
            .field("timeout_secs", &self.network.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_construction() {
        let bridge = RpcBridge::new(&WalletConfig::default()).unwrap();
        assert!(bridge.contract_address.is_none());
    }

    #[test]
    fn test_rejects_bad_rpc_url() {
        let mut config = WalletConfig::default();
        config.network.rpc_url = "not a url".to_string();
        let result = RpcBridge::new(&config);
        assert!(matches!(result, Err(WalletError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_operations_require_session() {
        // Session checks run before any network traffic, so these fail
        // immediately even with no endpoint behind the configured URL.
        let bridge = RpcBridge::new(&WalletConfig::default()).unwrap();

        let result = bridge.get_balance("0x0000000000000000000000000000000000000001").await;
        assert!(matches!(result, Err(WalletError::NotConnected)));

        let result = bridge
            .submit(ContractCall::Transfer {
                to: "0x0000000000000000000000000000000000000001".to_string(),
                amount: "1.0".to_string(),
            })
            .await;
        assert!(matches!(result, Err(WalletError::NotConnected)));

        let result = bridge.contract_balance().await;
        assert!(matches!(result, Err(WalletError::NotConnected)));
    }

    #[test]
    fn test_error_classification() {
        assert!(matches!(
            classify_handshake_error("user rejected the request"),
            WalletError::ConnectionRejected(_)
        ));
        assert!(matches!(
            classify_handshake_error("connection refused"),
            WalletError::ConnectionFailed(_)
        ));
        assert!(matches!(
            classify_submit_error("execution reverted: insufficient balance"),
            WalletError::TransactionReverted(_)
        ));
        assert!(matches!(
            classify_submit_error("nonce too low"),
            WalletError::TransactionRejected(_)
        ));
    }
}
