//! Conversion of transport-side tokens back into their original denomination.
//!
//! Used when counterpart tokens arrive from another chain and when a failed
//! converted transfer is reversed. Both cases move the counterpart coin into
//! the custodial account, burn it, and release the original denomination held
//! there since the outbound conversion.

use meridian_bank::BankKeeper;
use meridian_registry::RegistryLookup;
use meridian_types::{Address, Amount, Coin, Denom};
use tracing::debug;

use crate::precision::restore_precision;
use crate::{TransferError, MODULE_NAME};

/// How a transport-side denomination maps onto its original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionPlan {
    /// Lower-precision denomination carried over the transport.
    pub transport_denom: Denom,
    /// Higher-precision denomination the transport token stands for.
    pub original_denom: Denom,
    /// Decimal places removed on the way out.
    pub po: u32,
}

impl ConversionPlan {
    /// Resolve the plan for a locally held transport denomination.
    ///
    /// Returns `None` unless the entry names a unit denomination that points
    /// back at it as its counterpart and carries strictly more decimals.
    pub fn resolve(registry: &impl RegistryLookup, transport_denom: &Denom) -> Option<Self> {
        let transport = registry.get_denom(transport_denom.as_str());
        if transport.is_empty() || !transport.has_unit_denom() {
            return None;
        }
        let original = registry.get_denom(&transport.unit_denom);
        if original.is_empty() || original.ibc_counterparty_denom != transport.denom {
            return None;
        }
        if original.decimals <= transport.decimals {
            return None;
        }
        let original_denom = Denom::parse(&original.denom).ok()?;
        Some(Self {
            transport_denom: transport_denom.clone(),
            original_denom,
            po: original.decimals - transport.decimals,
        })
    }

    /// Original-precision amount that `transport_amount` stands for.
    pub fn original_amount(&self, transport_amount: &Amount) -> Amount {
        restore_precision(transport_amount, self.po)
    }

    /// Swap `transport_amount` held by `account` for its original denomination.
    ///
    /// Returns the coins burned and released. Callers run this on a branch.
    pub fn execute<B: BankKeeper>(
        &self,
        bank: &mut B,
        account: &Address,
        transport_amount: &Amount,
    ) -> Result<(Coin, Coin), TransferError> {
        let burned = Coin::new(self.transport_denom.clone(), transport_amount.clone());
        let released = Coin::new(self.original_denom.clone(), self.original_amount(transport_amount));

        bank.send_coins_from_account_to_module(account, MODULE_NAME, &burned)?;
        bank.burn_coins(MODULE_NAME, &burned)?;
        bank.send_coins_from_module_to_account(MODULE_NAME, account, &released)?;

        debug!(%account, %burned, %released, po = self.po, "transport tokens converted back");
        Ok((burned, released))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_bank::{MemoryBank, ModulePermissions};
    use meridian_registry::{RegistryEntry, TokenRegistry};

    fn test_address(n: u8) -> Address {
        Address::parse(&format!("mrd1user{n}")).unwrap()
    }

    fn denom(s: &str) -> Denom {
        Denom::parse(s).unwrap()
    }

    fn entry(denom: &str, decimals: u32, counterparty: &str, unit: &str) -> RegistryEntry {
        RegistryEntry {
            denom: denom.to_string(),
            base_denom: denom.to_string(),
            decimals,
            ibc_counterparty_denom: counterparty.to_string(),
            unit_denom: unit.to_string(),
            ..Default::default()
        }
    }

    fn test_registry() -> TokenRegistry {
        TokenRegistry::from_entries([
            entry("rowan", 18, "xrowan", ""),
            entry("xrowan", 10, "", "rowan"),
            entry("ceth", 18, "", ""),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_counterpart_pairs() {
        let plan = ConversionPlan::resolve(&test_registry(), &denom("xrowan")).unwrap();
        assert_eq!(plan.original_denom, denom("rowan"));
        assert_eq!(plan.po, 8);
        assert_eq!(
            plan.original_amount(&Amount::from(1234567891u64)),
            "123456789100000000".parse().unwrap()
        );
    }

    #[test]
    fn unrelated_or_unregistered_denoms_have_no_plan() {
        let registry = test_registry();
        assert!(ConversionPlan::resolve(&registry, &denom("rowan")).is_none());
        assert!(ConversionPlan::resolve(&registry, &denom("ceth")).is_none());
        assert!(ConversionPlan::resolve(&registry, &denom("uatom")).is_none());
    }

    #[test]
    fn unit_denom_must_point_back() {
        let registry = TokenRegistry::from_entries([
            entry("rowan", 18, "other", ""),
            entry("xrowan", 10, "", "rowan"),
        ])
        .unwrap();
        assert!(ConversionPlan::resolve(&registry, &denom("xrowan")).is_none());
    }

    #[test]
    fn equal_precision_is_not_converted() {
        let registry = TokenRegistry::from_entries([
            entry("rowan", 10, "xrowan", ""),
            entry("xrowan", 10, "", "rowan"),
        ])
        .unwrap();
        assert!(ConversionPlan::resolve(&registry, &denom("xrowan")).is_none());
    }

    #[test]
    fn execute_releases_locked_originals() {
        let plan = ConversionPlan::resolve(&test_registry(), &denom("xrowan")).unwrap();
        let mut bank = MemoryBank::new().with_module(MODULE_NAME, ModulePermissions::MINTER_BURNER);
        let custodial = Address::module(MODULE_NAME);
        bank.fund(&custodial, &Coin::new(denom("rowan"), 10_000_000_000u64));
        bank.fund(&test_address(1), &Coin::new(denom("xrowan"), 50u64));

        let (burned, released) = plan.execute(&mut bank, &test_address(1), &Amount::from(50u64)).unwrap();

        assert_eq!(burned, Coin::new(denom("xrowan"), 50u64));
        assert_eq!(released, Coin::new(denom("rowan"), 5_000_000_000u64));
        assert!(bank.supply(&denom("xrowan")).is_zero());
        assert_eq!(bank.balance(&custodial, &denom("rowan")), Amount::from(5_000_000_000u64));
        assert_eq!(bank.balance(&test_address(1), &denom("rowan")), Amount::from(5_000_000_000u64));
    }

    #[test]
    fn execute_fails_when_custodial_lacks_originals() {
        let plan = ConversionPlan::resolve(&test_registry(), &denom("xrowan")).unwrap();
        let mut bank = MemoryBank::new().with_module(MODULE_NAME, ModulePermissions::MINTER_BURNER);
        bank.fund(&test_address(1), &Coin::new(denom("xrowan"), 50u64));
        let err = plan
            .execute(&mut bank, &test_address(1), &Amount::from(50u64))
            .unwrap_err();
        assert!(matches!(err, TransferError::Bank(_)));
    }
}
