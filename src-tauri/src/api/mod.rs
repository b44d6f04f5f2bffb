//! Client for the equipment analytics REST API.

pub mod client;
pub mod payload;
pub mod types;

pub use client::ApiClient;
pub use types::*;
