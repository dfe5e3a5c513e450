//! Signer bridge: the boundary to the external key-holding agent.
//!
//! # Data Flow
//! ```text
//! WalletConnector / BalanceTracker / TransactionSubmitter
//!     → provider.rs (ProviderBridge trait, string-typed boundary)
//!     → rpc.rs (alloy-backed implementation)
//!     → contract.rs (SmartWallet calldata) + units.rs (display ↔ wei)
//!     → external signer endpoint
//! ```
//!
//! # Design Decisions
//! - The trait boundary is string-typed (addresses, display amounts);
//!   chain primitives never leave this module
//! - units.rs is the single point of display ↔ wei conversion
//! - Network selection is fixed at construction and never changes

pub mod contract;
pub mod provider;
pub mod rpc;
pub mod units;

pub use provider::{ContractCall, PendingTransaction, ProviderBridge};
pub use rpc::RpcBridge;
