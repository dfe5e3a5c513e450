//! Auth-session synchronization.

pub mod store;
pub mod sync;

pub use store::{MemorySessionStore, SessionStore};
pub use sync::SessionSync;
