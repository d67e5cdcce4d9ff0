//! Precision conversion.
//!
//! Scaling happens in the [`Dec`] domain so fractional remainders survive until
//! the caller truncates. Truncation is always toward zero: the module never
//! credits more than it took.

use meridian_types::{Amount, Dec};

/// `dec × 10^po`.
pub fn increase_precision(dec: &Dec, po: u32) -> Dec {
    dec.mul_pow10(po)
}

/// `dec ÷ 10^po`.
pub fn reduce_precision(dec: &Dec, po: u32) -> Dec {
    dec.quo_pow10(po)
}

/// Result of converting an outbound amount to a lower precision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertedAmount {
    /// Taken from the sender, in the original denomination and precision.
    pub deducted: Amount,
    /// Sent in the counterpart denomination, at transport precision.
    pub converted: Amount,
}

impl ConvertedAmount {
    /// The sub-granularity remainder of `requested` that is not sent.
    pub fn dust(&self, requested: &Amount) -> Amount {
        requested.saturating_sub(&self.deducted)
    }
}

/// Reduce `amount` by `po` decimals and compute what must be deducted for it.
///
/// `deducted` is `converted` scaled back up, so `deducted <= amount` and the
/// difference is always below `10^po`.
pub fn convert_for_transfer(amount: &Amount, po: u32) -> ConvertedAmount {
    let converted = reduce_precision(&Dec::from_amount(amount), po).truncate();
    let deducted = increase_precision(&Dec::from_amount(&converted), po).truncate();
    ConvertedAmount {
        deducted,
        converted,
    }
}

/// Scale a transport-precision amount back up to the original precision.
pub fn restore_precision(amount: &Amount, po: u32) -> Amount {
    increase_precision(&Dec::from_amount(amount), po).truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn eighteen_to_ten_decimals() {
        let result = convert_for_transfer(&amount("123456789123456789"), 8);
        assert_eq!(result.converted, amount("1234567891"));
        assert_eq!(result.deducted, amount("123456789100000000"));
        assert_eq!(result.dust(&amount("123456789123456789")), amount("23456789"));
    }

    #[test]
    fn truncation_never_rounds_up() {
        // ...99 would round to the next unit; it must not.
        let result = convert_for_transfer(&amount("1999999999"), 9);
        assert_eq!(result.converted, amount("1"));
        assert_eq!(result.deducted, amount("1000000000"));
    }

    #[test]
    fn amounts_below_granularity_convert_to_zero() {
        let result = convert_for_transfer(&amount("99999999"), 8);
        assert!(result.converted.is_zero());
        assert!(result.deducted.is_zero());
    }

    #[test]
    fn zero_offset_is_identity() {
        let result = convert_for_transfer(&amount("123456789123456789"), 0);
        assert_eq!(result.converted, result.deducted);
        assert_eq!(result.converted, amount("123456789123456789"));
    }

    #[test]
    fn offsets_wider_than_dec_precision() {
        let result = convert_for_transfer(&amount("123000000000000000000000000"), 24);
        assert_eq!(result.converted, amount("123"));
        assert_eq!(result.deducted, amount("123000000000000000000000000"));
        assert_eq!(restore_precision(&amount("123"), 24), result.deducted);
    }

    #[test]
    fn restore_is_inverse_of_reduction_for_whole_units() {
        let converted = amount("1234567891");
        assert_eq!(restore_precision(&converted, 8), amount("123456789100000000"));
    }
}
