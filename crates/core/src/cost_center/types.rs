//! Cost center domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use centavo_shared::types::{CostCenterId, UserId};

/// One of the three ordered authorization tiers.
///
/// Tiers are ordered from lowest to highest: a request's amount determines
/// the highest tier it must reach, and approvals climb strictly upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthTier {
    /// First authorization tier (smallest amounts).
    Tier1,
    /// Second authorization tier.
    Tier2,
    /// Third and final authorization tier (largest amounts).
    Tier3,
}

impl AuthTier {
    /// Returns the wire string for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tier1 => "tier1",
            Self::Tier2 => "tier2",
            Self::Tier3 => "tier3",
        }
    }

    /// Parses a tier from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tier1" => Some(Self::Tier1),
            "tier2" => Some(Self::Tier2),
            "tier3" => Some(Self::Tier3),
            _ => None,
        }
    }

    /// Returns the human-readable label for this tier.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
        }
    }

    /// Returns the tier above this one, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Tier1 => Some(Self::Tier2),
            Self::Tier2 => Some(Self::Tier3),
            Self::Tier3 => None,
        }
    }

    /// Returns the tiers that must already carry an approval before this
    /// one may act.
    #[must_use]
    pub fn prior_tiers(&self) -> &'static [Self] {
        match self {
            Self::Tier1 => &[],
            Self::Tier2 => &[Self::Tier1],
            Self::Tier3 => &[Self::Tier1, Self::Tier2],
        }
    }

    /// All tiers in ascending order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Tier1, Self::Tier2, Self::Tier3]
    }
}

impl std::fmt::Display for AuthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A user allowed to authorize at some tier of a cost center.
///
/// Carries the display name alongside the id so that notices and permission
/// errors can name people without a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    /// The user's identifier.
    pub user_id: UserId,
    /// The user's display name.
    pub name: String,
}

impl RosterMember {
    /// Creates a roster member.
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

/// A cost center with its own tier thresholds and authorizer rosters.
///
/// Referenced (never mutated) by requests during routing; created and
/// edited by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenter {
    /// Unique identifier.
    pub id: CostCenterId,
    /// Short code, uppercased on every write (e.g. `ADMIN`, `ALM`).
    pub code: String,
    /// Unique display name.
    pub name: String,
    /// Inactive centers cannot receive new requests.
    pub active: bool,
    /// Tier-1 ceiling: amounts strictly below it need tier 1 only.
    pub tier1_limit: Decimal,
    /// Tier-2 ceiling: amounts strictly below it need tier 2 at most.
    /// Must exceed `tier1_limit`.
    pub tier2_limit: Decimal,
    /// Users allowed to authorize at tier 1.
    pub tier1_roster: Vec<RosterMember>,
    /// Users allowed to authorize at tier 2.
    pub tier2_roster: Vec<RosterMember>,
    /// Users allowed to authorize at tier 3.
    pub tier3_roster: Vec<RosterMember>,
}

impl CostCenter {
    /// Creates an active cost center with empty rosters.
    ///
    /// The code is uppercased here and again on every repository write.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        tier1_limit: Decimal,
        tier2_limit: Decimal,
    ) -> Self {
        let mut center = Self {
            id: CostCenterId::new(),
            code: code.into(),
            name: name.into(),
            active: true,
            tier1_limit,
            tier2_limit,
            tier1_roster: Vec::new(),
            tier2_roster: Vec::new(),
            tier3_roster: Vec::new(),
        };
        center.normalize_code();
        center
    }

    /// Uppercases the center code in place.
    pub fn normalize_code(&mut self) {
        self.code = self.code.to_uppercase();
    }
}
