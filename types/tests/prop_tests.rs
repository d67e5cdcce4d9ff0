use proptest::prelude::*;

use meridian_types::{Amount, ChannelId, Dec, DenomTrace, PortId, TracePrefix};

proptest! {
    /// Lifting an integer into `Dec` and truncating it back is lossless.
    #[test]
    fn dec_from_amount_truncates_to_itself(raw in any::<u128>()) {
        let amount = Amount::from(raw);
        let dec = Dec::from_amount(&amount);
        prop_assert!(dec.is_integer());
        prop_assert_eq!(dec.truncate(), amount);
    }

    /// Chopped division truncates to exactly the integer floor.
    #[test]
    fn dec_quo_truncates_to_floor(raw in any::<u128>(), po in 0u32..30) {
        let amount = Amount::from(raw);
        let reduced = Dec::from_amount(&amount).quo_pow10(po).truncate();
        prop_assert_eq!(reduced, Amount::from(raw / 10u128.pow(po)));
    }

    /// Multiplying then dividing by the same power of ten is the identity.
    #[test]
    fn dec_mul_then_quo_is_identity(raw in any::<u64>(), po in 0u32..40) {
        let dec = Dec::from_amount(&Amount::from(raw));
        prop_assert_eq!(dec.mul_pow10(po).quo_pow10(po), dec);
    }

    /// Amount decimal string round-trips through parsing.
    #[test]
    fn amount_string_roundtrip(raw in any::<u128>()) {
        let amount = Amount::from(raw);
        let parsed: Amount = amount.to_string().parse().unwrap();
        prop_assert_eq!(parsed, amount);
    }

    /// Prefixing then parsing a trace recovers the same hops and base.
    #[test]
    fn trace_prefix_then_parse(channels in prop::collection::vec(0u64..1000, 0..4), base in "[a-z]{3,12}") {
        let mut trace = DenomTrace::new(Vec::new(), base.clone());
        for channel in &channels {
            trace.add_prefix(TracePrefix::new(PortId::transfer(), ChannelId::new(*channel)));
        }
        let parsed = DenomTrace::parse(&trace.full_path());
        prop_assert_eq!(parsed.path.len(), channels.len());
        prop_assert_eq!(parsed.base_denom, base);
    }
}
