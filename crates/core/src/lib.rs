//! hook-to-rest core — environment scanning, JSON coercion and delivery.
//!
//! The binary crate owns argument parsing and logging setup; everything that
//! decides what gets sent and where lives here so it can be tested without
//! touching the real process environment.

pub mod config;
pub mod env;
pub mod error;
pub mod hooks;

pub use config::RelayConfig;
pub use error::{RelayError, RelayResult};
