//! Pricing tiers and the credit allowance bought with each one.

use core::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a [`Tier`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TierError {
    /// The label is not one of the known tiers.
    #[error("unknown tier: {0:?}")]
    Unknown(String),
}

/// A paid pricing tier for the Compress API.
///
/// Form values are the lowercase labels (`starter`, `growth`, `professional`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Starter,
    Growth,
    Professional,
}

impl Tier {
    /// All tiers, cheapest first.
    pub const ALL: [Self; 3] = [Self::Starter, Self::Growth, Self::Professional];

    /// Label used in form submissions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Growth => "growth",
            Self::Professional => "professional",
        }
    }

    /// Human-readable name, also stored as the key's tier label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Growth => "Growth",
            Self::Professional => "Professional",
        }
    }

    /// Price charged for the tier, in cents.
    #[must_use]
    pub const fn amount_cents(self) -> i64 {
        match self {
            Self::Starter => 1000,
            Self::Growth => 3900,
            Self::Professional => 9900,
        }
    }

    /// Credits granted with the tier.
    #[must_use]
    pub const fn credits(self) -> i32 {
        match self {
            Self::Starter => 1500,
            Self::Growth => 10_000,
            Self::Professional => 50_000,
        }
    }

    /// Find the tier whose price is exactly `cents`.
    #[must_use]
    pub fn from_amount_cents(cents: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.amount_cents() == cents)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Self::Starter),
            "growth" => Ok(Self::Growth),
            "professional" => Ok(Self::Professional),
            other => Err(TierError::Unknown(other.to_owned())),
        }
    }
}

/// What a confirmed payment buys: a tier label and a credit allowance.
///
/// Amounts that match no tier resolve to the `unknown` label with zero
/// credits instead of an error. Callers that care can check
/// [`CreditGrant::is_recognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditGrant {
    tier: Option<Tier>,
}

impl CreditGrant {
    /// Label stored for amounts that match no tier.
    pub const UNKNOWN_LABEL: &'static str = "unknown";

    /// Map an exact paid amount (in cents) to its grant.
    #[must_use]
    pub fn from_amount_cents(cents: i64) -> Self {
        Self {
            tier: Tier::from_amount_cents(cents),
        }
    }

    /// The matched tier, if any.
    #[must_use]
    pub const fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// Tier label to store with the key.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.tier {
            Some(tier) => tier.display_name(),
            None => Self::UNKNOWN_LABEL,
        }
    }

    /// Credit allowance to store with the key.
    #[must_use]
    pub const fn credits(&self) -> i32 {
        match self.tier {
            Some(tier) => tier.credits(),
            None => 0,
        }
    }

    /// Whether the amount matched a known tier.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        self.tier.is_some()
    }
}
