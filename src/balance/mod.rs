//! Native-currency balance tracking.

pub mod tracker;

pub use tracker::BalanceTracker;
