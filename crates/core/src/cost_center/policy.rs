//! Tier resolution, roster checks, and write validation for cost centers.
//!
//! A `CostCenter` acts as a data-driven policy object: the workflow asks it
//! which tier an amount requires and whether a user may act at a tier,
//! keeping the state machine itself center-agnostic.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use centavo_shared::types::UserId;

use super::error::CostCenterError;
use super::types::{AuthTier, CostCenter, RosterMember};

fn fmt_amount(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

impl CostCenter {
    /// Returns the tier an amount of `amount` requires in this center.
    ///
    /// The boundary is strictly less-than the ceiling: an amount exactly
    /// equal to a threshold belongs to the next tier.
    #[must_use]
    pub fn required_tier(&self, amount: Decimal) -> AuthTier {
        if amount < self.tier1_limit {
            AuthTier::Tier1
        } else if amount < self.tier2_limit {
            AuthTier::Tier2
        } else {
            AuthTier::Tier3
        }
    }

    /// Returns the roster for a tier.
    #[must_use]
    pub fn roster(&self, tier: AuthTier) -> &[RosterMember] {
        match tier {
            AuthTier::Tier1 => &self.tier1_roster,
            AuthTier::Tier2 => &self.tier2_roster,
            AuthTier::Tier3 => &self.tier3_roster,
        }
    }

    /// Returns true if `user` may authorize at `tier` in this center.
    #[must_use]
    pub fn can_authorize(&self, user: UserId, tier: AuthTier) -> bool {
        self.roster(tier).iter().any(|m| m.user_id == user)
    }

    /// Display names of a tier's authorizers, joined for messages.
    #[must_use]
    pub fn roster_names(&self, tier: AuthTier) -> String {
        self.roster(tier)
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Human-readable amount range for a tier, using this center's own
    /// thresholds.
    #[must_use]
    pub fn tier_range_label(&self, tier: AuthTier) -> String {
        match tier {
            AuthTier::Tier1 => format!("below {}", fmt_amount(self.tier1_limit)),
            AuthTier::Tier2 => format!(
                "{} to below {}",
                fmt_amount(self.tier1_limit),
                fmt_amount(self.tier2_limit)
            ),
            AuthTier::Tier3 => format!("{} and above", fmt_amount(self.tier2_limit)),
        }
    }

    /// Validates the center's invariants.
    ///
    /// Checked on every create/update, independent of storage constraints:
    /// - tier-1 limit strictly positive
    /// - tier-2 limit strictly above tier-1 limit
    /// - active centers have a non-empty tier-1 roster
    /// - no user appears on more than one roster
    pub fn validate(&self) -> Result<(), CostCenterError> {
        if self.tier1_limit <= Decimal::ZERO {
            return Err(CostCenterError::NonPositiveTierOneLimit {
                limit: self.tier1_limit,
            });
        }

        if self.tier2_limit <= self.tier1_limit {
            return Err(CostCenterError::LimitsOutOfOrder {
                center: self.name.clone(),
                tier1_limit: self.tier1_limit,
                tier2_limit: self.tier2_limit,
            });
        }

        if self.active && self.tier1_roster.is_empty() {
            return Err(CostCenterError::EmptyTierOneRoster {
                center: self.name.clone(),
            });
        }

        // Cross-tier disjointness cannot be expressed as a single storage
        // constraint over three independent relations, so it is checked here.
        let mut roster_count: HashMap<UserId, u8> = HashMap::new();
        for tier in AuthTier::all() {
            let mut in_this_roster: HashSet<UserId> = HashSet::new();
            for member in self.roster(tier) {
                if in_this_roster.insert(member.user_id) {
                    *roster_count.entry(member.user_id).or_insert(0) += 1;
                }
            }
        }

        let mut offenders: Vec<String> = Vec::new();
        for tier in AuthTier::all() {
            for member in self.roster(tier) {
                if roster_count.get(&member.user_id).copied().unwrap_or(0) > 1
                    && !offenders.contains(&member.name)
                {
                    offenders.push(member.name.clone());
                }
            }
        }
        if !offenders.is_empty() {
            return Err(CostCenterError::OverlappingRosters {
                center: self.name.clone(),
                users: offenders.join(", "),
            });
        }

        Ok(())
    }
}
