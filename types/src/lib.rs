//! Fundamental types for the meridian transfer module.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, denominations, arbitrary-precision amounts, the fixed-point `Dec`,
//! transport identifiers and denomination traces.

pub mod address;
pub mod amount;
pub mod coin;
pub mod dec;
pub mod error;
pub mod ids;
pub mod trace;

pub use address::Address;
pub use amount::Amount;
pub use coin::{Coin, Denom};
pub use dec::Dec;
pub use error::TypesError;
pub use ids::{ChannelId, PortId, TimeoutHeight};
pub use trace::{receiver_chain_is_source, sender_chain_is_source, DenomTrace, TracePrefix};
