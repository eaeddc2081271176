//! Rarity ladder.
//!
//! Tiers are ordered most to least common. Weights sum to 10,000 so the
//! rarest tiers get sub-percent precision. Power scaling (stat floor,
//! feature count, ability count) is derived from the tier's rank, so every
//! tier is strictly stronger than the one below it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::weighted::{select_weighted, WeightedEntry};

/// Total of all tier weights; rarity draws are taken modulo this.
pub const RARITY_TOTAL_WEIGHT: u32 = 10_000;

/// Ability lists never grow past this
pub const ABILITY_HARD_CAP: usize = 8;

/// Abilities granted beyond the feature count
pub const ABILITY_OFFSET: usize = 1;

const STAT_FLOORS: [u32; 7] = [10, 20, 30, 45, 60, 80, 100];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Transcendent,
}

/// Power profile of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityScale {
    pub stat_floor: u32,
    pub feature_count: usize,
    pub ability_count: usize,
}

impl RarityTier {
    pub const ALL: [RarityTier; 7] = [
        RarityTier::Common,
        RarityTier::Uncommon,
        RarityTier::Rare,
        RarityTier::Epic,
        RarityTier::Legendary,
        RarityTier::Mythic,
        RarityTier::Transcendent,
    ];

    /// 0 for Common up to 6 for Transcendent
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    /// Selection weight out of `RARITY_TOTAL_WEIGHT`
    pub fn weight(&self) -> u32 {
        match self {
            Self::Common => 5000,
            Self::Uncommon => 2500,
            Self::Rare => 1500,
            Self::Epic => 700,
            Self::Legendary => 250,
            Self::Mythic => 45,
            Self::Transcendent => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythic => "Mythic",
            Self::Transcendent => "Transcendent",
        }
    }

    pub fn stat_floor(&self) -> u32 {
        STAT_FLOORS[self.rank()]
    }

    pub fn feature_count(&self) -> usize {
        self.rank() + 1
    }

    pub fn ability_count(&self) -> usize {
        (self.feature_count() + ABILITY_OFFSET).min(ABILITY_HARD_CAP)
    }

    pub fn scale(&self) -> RarityScale {
        RarityScale {
            stat_floor: self.stat_floor(),
            feature_count: self.feature_count(),
            ability_count: self.ability_count(),
        }
    }

    /// One tier up, saturating at the top of the ladder
    pub fn next(&self) -> Self {
        Self::from_rank(self.rank() + 1).unwrap_or(*self)
    }

    /// Expected frequency under uniform draws
    pub fn probability(&self) -> f64 {
        self.weight() as f64 / RARITY_TOTAL_WEIGHT as f64
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RarityTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| EngineError::Generation(format!("unknown rarity tier {s:?}")))
    }
}

fn ladder() -> [WeightedEntry<RarityTier>; 7] {
    RarityTier::ALL.map(|tier| WeightedEntry::new(tier, tier.weight()))
}

/// Map a draw in `[0, 10000)` onto a tier.
pub fn classify(draw: u32) -> RarityTier {
    // The ladder is never empty and its weights are positive.
    select_weighted(&ladder(), draw as u64)
        .copied()
        .unwrap_or(RarityTier::Transcendent)
}
