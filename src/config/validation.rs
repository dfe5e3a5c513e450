//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, chain id nonzero)
//! - Check endpoint and address formats before any RPC is attempted
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: WalletConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::bridge::units;
use crate::config::schema::WalletConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a loaded configuration, collecting every failure.
pub fn validate_config(config: &WalletConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.network.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError {
            field: "network.rpc_url",
            message: format!("invalid URL: {}", e),
        });
    }

    if config.network.chain_id == 0 {
        errors.push(ValidationError {
            field: "network.chain_id",
            message: "chain id must be nonzero".to_string(),
        });
    }

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "network.rpc_timeout_secs",
            message: "timeout must be greater than zero".to_string(),
        });
    }

    if config.network.confirmation_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "network.confirmation_timeout_secs",
            message: "timeout must be greater than zero".to_string(),
        });
    }

    // The contract address is optional (transfers and contract calls fail
    // with a clear error when unset), but when present it must be well-formed.
    if !config.contract.address.is_empty() && !is_hex_address(&config.contract.address) {
        errors.push(ValidationError {
            field: "contract.address",
            message: "expected a 0x-prefixed 20-byte hex address".to_string(),
        });
    }

    if let Err(e) = units::validate_amount(&config.contract.association_fee) {
        errors.push(ValidationError {
            field: "contract.association_fee",
            message: e.to_string(),
        });
    }

    if config.auth.user_id.is_empty() {
        errors.push(ValidationError {
            field: "auth.user_id",
            message: "user id must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: format!(
                "unknown log level \"{}\" (expected one of {:?})",
                config.observability.log_level, LOG_LEVELS
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_hex_address(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
