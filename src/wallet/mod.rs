//! Wallet session lifecycle and the observable service surface.

pub mod connector;
pub mod service;
pub mod state;

pub use connector::WalletConnector;
pub use service::WalletService;
pub use state::{ConnectionState, SessionState, WalletSession};
