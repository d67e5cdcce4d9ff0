//! Nullable infrastructure for deterministic testing.
//!
//! The ledger and the transport are abstracted behind traits. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be told to fail at a chosen point
//! - Record what they were asked to do
//!
//! Usage: swap real implementations for nullables in tests.

pub mod bank;
pub mod fixtures;
pub mod transport;

pub use bank::{FailPoint, NullBank};
pub use fixtures::{module_account, rowan_registry, test_address, test_channel};
pub use transport::RecordingKeeper;
