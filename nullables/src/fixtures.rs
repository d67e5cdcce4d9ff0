//! Shared test fixtures.

use meridian_registry::{Permission, RegistryEntry, TokenRegistry};
use meridian_transfer::MODULE_NAME;
use meridian_types::{Address, ChannelId};

/// Deterministic user address `mrd1user<n>`.
pub fn test_address(n: u8) -> Address {
    Address::parse(&format!("mrd1user{n}")).expect("fixture address is valid")
}

pub fn test_channel() -> ChannelId {
    ChannelId::new(0)
}

/// Custodial account of the transfer module.
pub fn module_account() -> Address {
    Address::module(MODULE_NAME)
}

/// `rowan` (18 decimals) converts into `xrowan` (10 decimals) for transport.
pub fn rowan_registry() -> TokenRegistry {
    TokenRegistry::from_entries([
        RegistryEntry {
            denom: "rowan".to_string(),
            base_denom: "rowan".to_string(),
            decimals: 18,
            ibc_counterparty_denom: "xrowan".to_string(),
            display_name: "ROWAN".to_string(),
            permissions: vec![Permission::Clp, Permission::IbcExport, Permission::IbcImport],
            ..Default::default()
        },
        RegistryEntry {
            denom: "xrowan".to_string(),
            base_denom: "xrowan".to_string(),
            decimals: 10,
            unit_denom: "rowan".to_string(),
            permissions: vec![Permission::IbcExport, Permission::IbcImport],
            ..Default::default()
        },
    ])
    .expect("fixture registry is valid")
}
