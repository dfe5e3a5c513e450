//! SmartWallet contract bindings and calldata encoding.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// Custody contract the session drives once connected.
    interface SmartWallet {
        function transfer(address to, uint256 amount) external;
        function purchaseItem(uint256 itemId) external;
        function getBalance() external view returns (uint256);
        function associateWallet(string memory identity) external payable;
    }
}

/// Encode `transfer(to, amount)` calldata; amount already in wei.
pub fn transfer_calldata(to: Address, amount: U256) -> Bytes {
    SmartWallet::transferCall { to, amount }.abi_encode().into()
}

/// Encode `purchaseItem(itemId)` calldata.
pub fn purchase_item_calldata(item_id: U256) -> Bytes {
    SmartWallet::purchaseItemCall { itemId: item_id }
        .abi_encode()
        .into()
}

/// Encode the `getBalance()` view call.
pub fn balance_calldata() -> Bytes {
    SmartWallet::getBalanceCall {}.abi_encode().into()
}

/// Encode `associateWallet(identity)` calldata; the fee travels as the
/// transaction value, not in the calldata.
pub fn associate_wallet_calldata(identity: &str) -> Bytes {
    SmartWallet::associateWalletCall {
        identity: identity.to_string(),
    }
    .abi_encode()
    .into()
}

/// Decode the return of `getBalance()` into a wei amount.
pub fn decode_balance(output: &[u8]) -> Result<U256, String> {
    SmartWallet::getBalanceCall::abi_decode_returns(output)
        .map_err(|e| format!("failed to decode getBalance return: {}", e))
}
