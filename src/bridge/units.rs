//! Display-unit and wei conversion.
//!
//! The single place amounts change representation. Everywhere else in the
//! crate an amount is a decimal string in native display units; only the
//! bridge converts to and from the chain's smallest unit.

use alloy::primitives::utils::{format_ether, parse_ether};
use alloy::primitives::U256;

use crate::error::{WalletError, WalletResult};

/// Check that `amount` is a positive, finite decimal without converting it.
pub fn validate_amount(amount: &str) -> WalletResult<()> {
    parse_display(amount).map(|_| ())
}

/// Parse a display-unit amount into wei.
///
/// Rejects empty, negative, zero, and non-decimal inputs with
/// `InvalidAmount`; nothing invalid reaches the signer.
pub fn parse_display(amount: &str) -> WalletResult<U256> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(invalid(amount, "amount is empty"));
    }
    if trimmed.starts_with('-') {
        return Err(invalid(amount, "amount must be positive"));
    }
    let wei = parse_ether(trimmed)
        .map_err(|e| invalid(amount, &format!("not a decimal amount: {}", e)))?;
    if wei.is_zero() {
        return Err(invalid(amount, "amount must be greater than zero"));
    }
    Ok(wei)
}

/// Format a wei amount as a trimmed display string ("2.5", not
/// "2.500000000000000000").
pub fn format_wei(wei: U256) -> String {
    let raw = format_ether(wei);
    match raw.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{}.{}", int, frac)
            }
        }
        None => raw,
    }
}

fn invalid(amount: &str, reason: &str) -> WalletError {
    WalletError::InvalidAmount {
        amount: amount.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_display("1").unwrap(), ether(1));
        assert_eq!(parse_display("2.5").unwrap(), ether(5) / U256::from(2));
        assert_eq!(parse_display(" 1.0 ").unwrap(), ether(1));
    }

    #[test]
    fn test_rejects_zero_negative_and_garbage() {
        for bad in ["0", "0.0", "-1", "", "  ", "abc", "1.2.3"] {
            let err = parse_display(bad).unwrap_err();
            assert!(
                matches!(err, WalletError::InvalidAmount { .. }),
                "expected InvalidAmount for {:?}, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_wei(ether(5) / U256::from(2)), "2.5");
        assert_eq!(format_wei(ether(1)), "1");
        assert_eq!(format_wei(U256::ZERO), "0");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        let wei = parse_display("0.01").unwrap();
        assert_eq!(format_wei(wei), "0.01");
    }
}
