//! Ledger service for the meridian transfer module.
//!
//! [`BankKeeper`] exposes balance and supply primitives; the coin movements the
//! transfer module needs (account ↔ module sends, mint, burn) are provided
//! methods built on top of them, so every backend enforces the same rules.
//!
//! [`CacheBank`] buffers writes over any keeper. A coordinator runs its whole
//! ledger sequence against a branch and commits only on success, which makes
//! each sequence all-or-nothing.

pub mod cache;
pub mod error;
pub mod keeper;
pub mod memory;

pub use cache::CacheBank;
pub use error::BankError;
pub use keeper::{BankKeeper, ModulePermissions};
pub use memory::MemoryBank;
