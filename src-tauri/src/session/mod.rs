//! Persisted login session.
//!
//! The session is a single Basic-Auth token kept in the OS secret store.
//! Nothing here talks to the network: validity is only discovered when an
//! API call using the token fails.

pub mod store;
pub mod token;
pub mod vault;

pub use store::SessionStore;
pub use token::{AuthToken, Credentials};
pub use vault::{KeyringVault, MemoryVault, TokenVault};
