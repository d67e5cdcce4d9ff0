//! Token registry for the meridian transfer module.
//!
//! Every denomination the chain knows about has a [`RegistryEntry`] recording
//! its decimal precision and how it relates to other denominations:
//! - `ibc_counterparty_denom`: the lower-precision denomination this token is
//!   converted into before it leaves the chain.
//! - `unit_denom`: on a transport-side denomination, the original it stands for.
//! - `base_denom`: the denomination on the chain a voucher originated from.
//!
//! The transfer coordinators only read the registry, through [`RegistryLookup`].

pub mod entry;
pub mod error;
pub mod permission;
pub mod registry;

pub use entry::RegistryEntry;
pub use error::RegistryError;
pub use permission::Permission;
pub use registry::{RegistryLookup, TokenRegistry};
