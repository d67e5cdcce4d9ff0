//! In-memory bank keeper.

use std::collections::{BTreeMap, HashMap};

use meridian_types::{Address, Amount, Coin, Denom};

use crate::{BankKeeper, ModulePermissions};

/// Balances and supply held in ordered maps. Zero balances are not stored.
#[derive(Clone, Debug, Default)]
pub struct MemoryBank {
    balances: BTreeMap<(Address, Denom), Amount>,
    supply: BTreeMap<Denom, Amount>,
    modules: HashMap<String, ModulePermissions>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module account with the given permissions.
    pub fn with_module(mut self, name: &str, permissions: ModulePermissions) -> Self {
        self.register_module(name, permissions);
        self
    }

    pub fn register_module(&mut self, name: &str, permissions: ModulePermissions) {
        self.modules.insert(name.to_string(), permissions);
    }

    /// Credit `coin` to `account` as new supply, the way genesis balances are created.
    pub fn fund(&mut self, account: &Address, coin: &Coin) {
        let balance = &self.balance(account, &coin.denom) + &coin.amount;
        self.set_balance(account, &coin.denom, balance);
        let supply = &self.supply(&coin.denom) + &coin.amount;
        self.set_supply(&coin.denom, supply);
    }

    /// All non-zero balances of one account.
    pub fn balances_of(&self, account: &Address) -> Vec<Coin> {
        self.balances
            .iter()
            .filter(|((owner, _), _)| owner == account)
            .map(|((_, denom), amount)| Coin {
                denom: denom.clone(),
                amount: amount.clone(),
            })
            .collect()
    }

    /// Sum of every stored balance of `denom`; equals its supply when the ledger is consistent.
    pub fn total_held(&self, denom: &Denom) -> Amount {
        self.balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .fold(Amount::zero(), |acc, (_, amount)| &acc + amount)
    }
}

impl BankKeeper for MemoryBank {
    fn balance(&self, account: &Address, denom: &Denom) -> Amount {
        self.balances
            .get(&(account.clone(), denom.clone()))
            .cloned()
            .unwrap_or_default()
    }

    fn set_balance(&mut self, account: &Address, denom: &Denom, amount: Amount) {
        let key = (account.clone(), denom.clone());
        if amount.is_zero() {
            self.balances.remove(&key);
        } else {
            self.balances.insert(key, amount);
        }
    }

    fn supply(&self, denom: &Denom) -> Amount {
        self.supply.get(denom).cloned().unwrap_or_default()
    }

    fn set_supply(&mut self, denom: &Denom, amount: Amount) {
        if amount.is_zero() {
            self.supply.remove(denom);
        } else {
            self.supply.insert(denom.clone(), amount);
        }
    }

    fn module_permissions(&self, module: &str) -> ModulePermissions {
        self.modules.get(module).copied().unwrap_or(ModulePermissions::NONE)
    }
}
