//! Denominations and coins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Amount, TypesError};

/// A validated denomination, e.g. `rowan`, `xrowan` or `ibc/27394FB0...`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Denom(String);

impl Denom {
    const MIN_LEN: usize = 2;
    const MAX_LEN: usize = 128;
    const IBC_PREFIX: &'static str = "ibc/";

    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidDenom(raw.to_string());
        if raw.len() < Self::MIN_LEN || raw.len() > Self::MAX_LEN {
            return Err(invalid());
        }
        let mut chars = raw.chars();
        if !chars.next().map_or(false, |c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c)) {
            return Err(invalid());
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a hashed voucher denomination (`ibc/<hash>`).
    pub fn is_ibc_hashed(&self) -> bool {
        self.0.starts_with(Self::IBC_PREFIX)
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Denom {
    type Err = TypesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Denom {
    type Error = TypesError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Denom> for String {
    fn from(denom: Denom) -> Self {
        denom.0
    }
}

/// An amount of a single denomination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: Denom, amount: impl Into<Amount>) -> Self {
        Self {
            denom,
            amount: amount.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_native_trace_and_hashed_denoms() {
        for raw in ["rowan", "xrowan", "transfer/channel-0/uatom", "ibc/27394FB092D2ECCD"] {
            assert!(Denom::parse(raw).is_ok(), "{raw} should be valid");
        }
        assert!(Denom::parse("ibc/ABC").unwrap().is_ibc_hashed());
        assert!(!Denom::parse("rowan").unwrap().is_ibc_hashed());
    }

    #[test]
    fn rejects_malformed_denoms() {
        for raw in ["", "r", "1rowan", "row an", "/rowan"] {
            assert!(Denom::parse(raw).is_err(), "{raw} should be invalid");
        }
    }

    #[test]
    fn coin_displays_amount_then_denom() {
        let coin = Coin::new(Denom::parse("rowan").unwrap(), 100u64);
        assert_eq!(coin.to_string(), "100rowan");
        assert!(!coin.is_zero());
    }
}
