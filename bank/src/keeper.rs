//! Bank keeper trait.

use meridian_types::{Address, Amount, Coin, Denom};
use tracing::debug;

use crate::{BankError, CacheBank};

/// What a module account is allowed to do besides holding coins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModulePermissions {
    pub minter: bool,
    pub burner: bool,
}

impl ModulePermissions {
    pub const NONE: Self = Self {
        minter: false,
        burner: false,
    };

    pub const MINTER_BURNER: Self = Self {
        minter: true,
        burner: true,
    };
}

/// Trait for ledger balance operations.
///
/// Implementors supply the five primitives; the coin movements are provided
/// and must not be overridden with weaker checks. Zero-amount coins are a no-op.
pub trait BankKeeper {
    fn balance(&self, account: &Address, denom: &Denom) -> Amount;
    fn set_balance(&mut self, account: &Address, denom: &Denom, amount: Amount);
    fn supply(&self, denom: &Denom) -> Amount;
    fn set_supply(&mut self, denom: &Denom, amount: Amount);
    fn module_permissions(&self, module: &str) -> ModulePermissions;

    /// Move `coin` between two accounts.
    fn send_coins(&mut self, from: &Address, to: &Address, coin: &Coin) -> Result<(), BankError> {
        if coin.is_zero() {
            return Ok(());
        }
        let available = self.balance(from, &coin.denom);
        let remaining = available
            .checked_sub(&coin.amount)
            .ok_or_else(|| BankError::InsufficientFunds {
                account: from.to_string(),
                needed: coin.to_string(),
                available: format!("{}{}", available, coin.denom),
            })?;
        self.set_balance(from, &coin.denom, remaining);
        let credited = &self.balance(to, &coin.denom) + &coin.amount;
        self.set_balance(to, &coin.denom, credited);
        Ok(())
    }

    fn send_coins_from_account_to_module(
        &mut self,
        from: &Address,
        module: &str,
        coin: &Coin,
    ) -> Result<(), BankError> {
        self.send_coins(from, &Address::module(module), coin)
    }

    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &Address,
        coin: &Coin,
    ) -> Result<(), BankError> {
        self.send_coins(&Address::module(module), to, coin)
    }

    /// Create `coin` in the module account. Requires the minter permission.
    fn mint_coins(&mut self, module: &str, coin: &Coin) -> Result<(), BankError> {
        if !self.module_permissions(module).minter {
            return Err(BankError::MintNotPermitted(module.to_string()));
        }
        if coin.is_zero() {
            return Ok(());
        }
        let account = Address::module(module);
        let credited = &self.balance(&account, &coin.denom) + &coin.amount;
        self.set_balance(&account, &coin.denom, credited);
        let supply = &self.supply(&coin.denom) + &coin.amount;
        self.set_supply(&coin.denom, supply);
        debug!(%module, %coin, "minted coins");
        Ok(())
    }

    /// Destroy `coin` held by the module account. Requires the burner permission.
    fn burn_coins(&mut self, module: &str, coin: &Coin) -> Result<(), BankError> {
        if !self.module_permissions(module).burner {
            return Err(BankError::BurnNotPermitted(module.to_string()));
        }
        if coin.is_zero() {
            return Ok(());
        }
        let account = Address::module(module);
        let available = self.balance(&account, &coin.denom);
        let remaining = available
            .checked_sub(&coin.amount)
            .ok_or_else(|| BankError::InsufficientFunds {
                account: account.to_string(),
                needed: coin.to_string(),
                available: format!("{}{}", available, coin.denom),
            })?;
        let supply = self
            .supply(&coin.denom)
            .checked_sub(&coin.amount)
            .ok_or_else(|| BankError::SupplyUnderflow(coin.denom.to_string()))?;
        self.set_balance(&account, &coin.denom, remaining);
        self.set_supply(&coin.denom, supply);
        debug!(%module, %coin, "burned coins");
        Ok(())
    }

    /// Open a write-buffering branch over this keeper.
    fn branch(&mut self) -> CacheBank<'_, Self>
    where
        Self: Sized,
    {
        CacheBank::new(self)
    }
}
