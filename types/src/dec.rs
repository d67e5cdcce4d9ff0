//! Fixed-point decimal used for precision conversion.
//!
//! A `Dec` is an unsigned integer scaled by `10^18`, so fractional remainders
//! survive intermediate steps of a conversion. Division chops excess digits
//! instead of rounding: a `Dec` derived by division is never larger than the
//! exact quotient, which keeps every truncated result a floor.

use num_bigint::BigUint;
use std::fmt;
use std::str::FromStr;

use crate::{Amount, TypesError};

/// Number of fractional digits carried by every [`Dec`].
pub const DEC_PRECISION: u32 = 18;

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigUint);

impl Dec {
    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    /// Lift an integer amount into the decimal domain without loss.
    pub fn from_amount(amount: &Amount) -> Self {
        Self(amount.as_biguint() * pow10(DEC_PRECISION))
    }

    /// `self × 10^po`. Exact.
    pub fn mul_pow10(&self, po: u32) -> Self {
        if po == 0 {
            return self.clone();
        }
        Self(&self.0 * pow10(po))
    }

    /// `self ÷ 10^po`, chopped to 18 fractional digits.
    pub fn quo_pow10(&self, po: u32) -> Self {
        if po == 0 {
            return self.clone();
        }
        Self(&self.0 / pow10(po))
    }

    /// Drop the fractional part (truncation toward zero).
    pub fn truncate(&self) -> Amount {
        Amount::from_biguint(&self.0 / pow10(DEC_PRECISION))
    }

    pub fn is_integer(&self) -> bool {
        &self.0 % pow10(DEC_PRECISION) == BigUint::default()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigUint::default()
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = pow10(DEC_PRECISION);
        let int = &self.0 / &unit;
        let frac = &self.0 % &unit;
        write!(f, "{}.{:0>width$}", int, frac.to_string(), width = DEC_PRECISION as usize)
    }
}

impl FromStr for Dec {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidDecimal(s.to_string());
        let (int, frac) = match s.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (s, ""),
        };
        if int.is_empty()
            || frac.len() > DEC_PRECISION as usize
            || !int.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let int: BigUint = int.parse().map_err(|_| invalid())?;
        let padded = format!("{:0<width$}", frac, width = DEC_PRECISION as usize);
        let frac: BigUint = padded.parse().map_err(|_| invalid())?;
        Ok(Self(int * pow10(DEC_PRECISION) + frac))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test]
    fn quo_keeps_fraction_until_truncated() {
        let d = Dec::from_amount(&Amount::from(123456789u64)).quo_pow10(4);
        assert_eq!(d, dec("12345.6789"));
        assert_eq!(d.truncate(), Amount::from(12345u64));
        assert!(!d.is_integer());
    }

    #[test]
    fn quo_chops_beyond_eighteen_digits() {
        // 19 nines divided by 10^19 is 0.9999999999999999999; chopping keeps 18 nines.
        let nines = Amount::from(9_999_999_999_999_999_999u128);
        let d = Dec::from_amount(&nines).quo_pow10(19);
        assert_eq!(d.to_string(), "0.999999999999999999");
        assert_eq!(d.truncate(), Amount::zero());
    }

    #[test]
    fn zero_exponent_is_identity() {
        let d = dec("42.5");
        assert_eq!(d.mul_pow10(0), d);
        assert_eq!(d.quo_pow10(0), d);
    }

    #[test]
    fn display_pads_fraction() {
        assert_eq!(dec("1.5").to_string(), "1.500000000000000000");
        assert_eq!(Dec::zero().to_string(), "0.000000000000000000");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!("".parse::<Dec>().is_err());
        assert!(".5".parse::<Dec>().is_err());
        assert!("1.2.3".parse::<Dec>().is_err());
        assert!("-1".parse::<Dec>().is_err());
        assert!("0.1234567890123456789".parse::<Dec>().is_err());
    }
}
