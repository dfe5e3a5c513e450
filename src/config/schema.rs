//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the wallet
//! session subsystem. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the wallet session subsystem.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// Network the signer bridge is pinned to.
    pub network: NetworkConfig,

    /// Smart-wallet contract settings.
    pub contract: ContractConfig,

    /// Auth-session settings.
    pub auth: AuthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Signer bridge network configuration.
///
/// Network selection is fixed: the bridge is constructed with these values
/// and they do not change for the lifetime of the session.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Human-readable network name, used for logging only.
    pub name: String,

    /// JSON-RPC endpoint of the external signer.
    pub rpc_url: String,

    /// Chain ID the endpoint must report (e.g., 11155111 for Sepolia).
    pub chain_id: u64,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a submitted transaction to confirm.
    pub confirmation_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "sepolia".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 11155111,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 180,
        }
    }
}

/// Smart-wallet contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Deployed SmartWallet contract address.
    pub address: String,

    /// Fee attached to `associateWallet`, in native display units.
    pub association_fee: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            association_fee: "0.01".to_string(),
        }
    }
}

/// Auth-session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Logical user whose auth session carries the wallet address.
    pub user_id: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_id: "default".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.network.name, "sepolia");
        assert_eq!(config.network.chain_id, 11155111);
        assert_eq!(config.network.rpc_timeout_secs, 10);
        assert_eq!(config.contract.association_fee, "0.01");
        assert!(config.contract.address.is_empty());
    }

    #[test]
    fn test_minimal_toml() {
        let config: WalletConfig = toml::from_str(
            r#"
            [network]
            rpc_url = "http://localhost:9545"
            chain_id = 31337
            "#,
        )
        .unwrap();
        assert_eq!(config.network.rpc_url, "http://localhost:9545");
        assert_eq!(config.network.chain_id, 31337);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.network.confirmation_blocks, 1);
        assert_eq!(config.auth.user_id, "default");
    }
}
