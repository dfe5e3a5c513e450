//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WalletConfig (validated, immutable)
//!     → handed to the bridge and service at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the network a session is pinned to
//!   never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ContractConfig;
pub use schema::NetworkConfig;
pub use schema::WalletConfig;
