//! Nullable bank: an in-memory ledger that can be told to fail.

use meridian_bank::{BankKeeper, MemoryBank, ModulePermissions};
use meridian_types::{Address, Amount, Coin, Denom};

/// Where a [`NullBank`] should make operations fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailPoint {
    /// Module accounts lose the minter permission.
    Mint,
    /// Module accounts lose the burner permission.
    Burn,
    /// The account appears empty, so any send out of it is short of funds.
    Drained(Address),
}

/// A [`MemoryBank`] with programmable failures.
///
/// Failures are injected through the ledger primitives, so they surface the
/// same way through any number of [`meridian_bank::CacheBank`] branches.
#[derive(Clone, Debug, Default)]
pub struct NullBank {
    inner: MemoryBank,
    fail_on: Vec<FailPoint>,
}

impl NullBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, name: &str, permissions: ModulePermissions) -> Self {
        self.inner.register_module(name, permissions);
        self
    }

    /// Keep failing at `point` until [`NullBank::clear_failures`].
    pub fn fail_on(&mut self, point: FailPoint) {
        self.fail_on.push(point);
    }

    pub fn clear_failures(&mut self) {
        self.fail_on.clear();
    }

    pub fn fund(&mut self, account: &Address, coin: &Coin) {
        self.inner.fund(account, coin);
    }

    /// Balances as stored, ignoring injected failures.
    pub fn balances_of(&self, account: &Address) -> Vec<Coin> {
        self.inner.balances_of(account)
    }

    fn should_fail(&self, point: &FailPoint) -> bool {
        self.fail_on.contains(point)
    }
}

impl BankKeeper for NullBank {
    fn balance(&self, account: &Address, denom: &Denom) -> Amount {
        if self.should_fail(&FailPoint::Drained(account.clone())) {
            return Amount::zero();
        }
        self.inner.balance(account, denom)
    }

    fn set_balance(&mut self, account: &Address, denom: &Denom, amount: Amount) {
        self.inner.set_balance(account, denom, amount);
    }

    fn supply(&self, denom: &Denom) -> Amount {
        self.inner.supply(denom)
    }

    fn set_supply(&mut self, denom: &Denom, amount: Amount) {
        self.inner.set_supply(denom, amount);
    }

    fn module_permissions(&self, module: &str) -> ModulePermissions {
        let mut permissions = self.inner.module_permissions(module);
        if self.should_fail(&FailPoint::Mint) {
            permissions.minter = false;
        }
        if self.should_fail(&FailPoint::Burn) {
            permissions.burner = false;
        }
        permissions
    }
}
