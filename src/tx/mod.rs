//! Transaction submission and confirmation tracking.

pub mod submitter;

pub use submitter::{TransactionHandle, TransactionResult, TransactionSubmitter, TransferRequest};
