//! Property-based tests for the cost center tier policy.

use proptest::prelude::*;
use rust_decimal::Decimal;

use centavo_shared::types::UserId;

use crate::cost_center::types::{AuthTier, CostCenter, RosterMember};

/// Strategy for a valid pair of ascending tier limits.
fn arb_limits() -> impl Strategy<Value = (Decimal, Decimal)> {
    (1i64..1_000_000i64, 1i64..1_000_000i64).prop_map(|(a, b)| {
        let lo = a.min(b);
        let hi = a.max(b) + lo; // guarantees hi > lo
        (Decimal::new(lo, 2), Decimal::new(hi, 2))
    })
}

/// Strategy for non-negative amounts.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn center_with_limits(tier1_limit: Decimal, tier2_limit: Decimal) -> CostCenter {
    let mut center = CostCenter::new("OPS", "Operations", tier1_limit, tier2_limit);
    center.tier1_roster = vec![RosterMember::new(UserId::new(), "T1")];
    center
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// required_tier is monotonic non-decreasing in the amount.
    #[test]
    fn prop_required_tier_monotonic(
        (tier1_limit, tier2_limit) in arb_limits(),
        a in arb_amount(),
        b in arb_amount(),
    ) {
        let center = center_with_limits(tier1_limit, tier2_limit);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(center.required_tier(lo) <= center.required_tier(hi));
    }

    /// An amount exactly at a ceiling belongs to the next tier.
    #[test]
    fn prop_threshold_boundaries(
        (tier1_limit, tier2_limit) in arb_limits(),
    ) {
        let center = center_with_limits(tier1_limit, tier2_limit);
        prop_assert_eq!(center.required_tier(tier1_limit), AuthTier::Tier2);
        prop_assert_eq!(center.required_tier(tier2_limit), AuthTier::Tier3);
    }

    /// The tier below a ceiling stays below it.
    #[test]
    fn prop_just_below_ceiling(
        (tier1_limit, tier2_limit) in arb_limits(),
    ) {
        let center = center_with_limits(tier1_limit, tier2_limit);
        let cent = Decimal::new(1, 2);
        prop_assert_eq!(center.required_tier(tier1_limit - cent), AuthTier::Tier1);
        prop_assert_eq!(center.required_tier(tier2_limit - cent), AuthTier::Tier2);
    }

    /// Every amount resolves to exactly one tier and the range labels agree
    /// with the resolution.
    #[test]
    fn prop_label_matches_resolution(
        (tier1_limit, tier2_limit) in arb_limits(),
        amount in arb_amount(),
    ) {
        let center = center_with_limits(tier1_limit, tier2_limit);
        let tier = center.required_tier(amount);
        // The label for the resolved tier is always non-empty and derived
        // from this center's thresholds.
        let label = center.tier_range_label(tier);
        prop_assert!(!label.is_empty());
        match tier {
            AuthTier::Tier1 => prop_assert!(amount < tier1_limit),
            AuthTier::Tier2 => prop_assert!(amount >= tier1_limit && amount < tier2_limit),
            AuthTier::Tier3 => prop_assert!(amount >= tier2_limit),
        }
    }
}
