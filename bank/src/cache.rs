//! Write-buffering branch over a bank keeper.

use std::collections::BTreeMap;

use meridian_types::{Address, Amount, Denom};

use crate::{BankKeeper, ModulePermissions};

/// Reads fall through to the parent until a key is written; writes stay in the
/// branch. [`CacheBank::commit`] applies them to the parent, dropping the branch
/// discards them.
pub struct CacheBank<'a, B: ?Sized> {
    parent: &'a mut B,
    balances: BTreeMap<(Address, Denom), Amount>,
    supply: BTreeMap<Denom, Amount>,
}

impl<'a, B: BankKeeper + ?Sized> CacheBank<'a, B> {
    pub fn new(parent: &'a mut B) -> Self {
        Self {
            parent,
            balances: BTreeMap::new(),
            supply: BTreeMap::new(),
        }
    }

    /// Whether any write is buffered.
    pub fn is_dirty(&self) -> bool {
        !self.balances.is_empty() || !self.supply.is_empty()
    }

    pub fn commit(self) {
        let Self {
            parent,
            balances,
            supply,
        } = self;
        for ((account, denom), amount) in balances {
            parent.set_balance(&account, &denom, amount);
        }
        for (denom, amount) in supply {
            parent.set_supply(&denom, amount);
        }
    }
}

impl<'a, B: BankKeeper + ?Sized> BankKeeper for CacheBank<'a, B> {
    fn balance(&self, account: &Address, denom: &Denom) -> Amount {
        match self.balances.get(&(account.clone(), denom.clone())) {
            Some(amount) => amount.clone(),
            None => self.parent.balance(account, denom),
        }
    }

    fn set_balance(&mut self, account: &Address, denom: &Denom, amount: Amount) {
        self.balances.insert((account.clone(), denom.clone()), amount);
    }

    fn supply(&self, denom: &Denom) -> Amount {
        match self.supply.get(denom) {
            Some(amount) => amount.clone(),
            None => self.parent.supply(denom),
        }
    }

    fn set_supply(&mut self, denom: &Denom, amount: Amount) {
        self.supply.insert(denom.clone(), amount);
    }

    fn module_permissions(&self, module: &str) -> ModulePermissions {
        self.parent.module_permissions(module)
    }
}
