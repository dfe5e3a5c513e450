//! Wallet connection and transaction-submission subsystem.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │                WalletService                  │
//!                 │  snapshot / subscribe / connect / send / …    │
//!                 └───────┬───────────────┬───────────────┬──────┘
//!                         │               │               │
//!                 ┌───────▼──────┐ ┌──────▼───────┐ ┌─────▼──────────┐
//!                 │   wallet     │ │     tx       │ │    balance     │
//!                 │  connector   │ │  submitter   │ │    tracker     │
//!                 └───┬──────┬───┘ └──────┬───────┘ └─────┬──────────┘
//!                     │      │            │               │
//!              ┌──────▼──┐   │     ┌──────▼───────────────▼─────┐
//!              │ session │   │     │          bridge            │
//!              │  sync   │   └────▶│  provider trait / rpc impl │
//!              └────┬────┘         └──────────────┬─────────────┘
//!                   │                             │
//!            auth-session store            external signer
//! ```
//!
//! The bridge is the only component that talks to the external signer and
//! the only place display amounts become wei. The connector owns the single
//! connection lifecycle; everything observable flows through one
//! `SessionState` handle.

pub mod balance;
pub mod bridge;
pub mod config;
pub mod error;
pub mod session;
pub mod tx;
pub mod wallet;

pub use bridge::provider::{ContractCall, PendingTransaction, ProviderBridge};
pub use bridge::rpc::RpcBridge;
pub use config::WalletConfig;
pub use error::{WalletError, WalletResult};
pub use session::store::{MemorySessionStore, SessionStore};
pub use tx::submitter::{TransactionHandle, TransactionResult, TransferRequest};
pub use wallet::service::WalletService;
pub use wallet::state::{ConnectionState, SessionState, WalletSession};
