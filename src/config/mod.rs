//! Engine configuration.
//!
//! Loaded from RON or JSON (picked by file extension). Every field has a
//! default, so a config file only needs to name what it changes.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::logging::TracingConfig;

/// Upper bound for `stat_variance`
pub const MAX_STAT_VARIANCE: u32 = 10_000;

/// Upper bound for `health_base`
pub const MAX_HEALTH_BASE: u32 = 1_000_000;

/// Upper bound for `tier_bonus_per_rank` and `jitter`
pub const MAX_BREEDING_BONUS: u32 = 10_000;

fn check_bound(field: &str, value: u32, max: u32) -> EngineResult<()> {
    if value > max {
        return Err(EngineError::Generation(format!(
            "{field} must be at most {max}, got {value}"
        )));
    }
    Ok(())
}

/// Probabilities and bonuses used by breeding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingRules {
    /// Weight of keeping parent A's trait
    pub inherit_a_weight: u32,
    /// Weight of keeping parent B's trait
    pub inherit_b_weight: u32,
    /// Weight of drawing a fresh trait value
    pub mutate_weight: u32,
    /// Percent chance the offspring is promoted one tier above the better parent
    pub promotion_chance: u32,
    /// Flat stat bonus per offspring rarity rank
    pub tier_bonus_per_rank: u32,
    /// Upper bound of the non-negative per-stat jitter
    pub jitter: u32,
    /// Extra inherited features/abilities allowed past the tier count
    pub lineage_bonus: usize,
}

impl Default for BreedingRules {
    fn default() -> Self {
        Self {
            inherit_a_weight: 45,
            inherit_b_weight: 45,
            mutate_weight: 10,
            promotion_chance: 10,
            tier_bonus_per_rank: 2,
            jitter: 5,
            lineage_bonus: 1,
        }
    }
}

impl BreedingRules {
    pub fn choice_total(&self) -> u32 {
        self.inherit_a_weight + self.inherit_b_weight + self.mutate_weight
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.choice_total() == 0 {
            return Err(EngineError::Generation(
                "breeding inheritance weights sum to zero".into(),
            ));
        }
        if self.promotion_chance > 100 {
            return Err(EngineError::Generation(format!(
                "promotion_chance is a percentage, got {}",
                self.promotion_chance
            )));
        }
        check_bound("tier_bonus_per_rank", self.tier_bonus_per_rank, MAX_BREEDING_BONUS)?;
        check_bound("jitter", self.jitter, MAX_BREEDING_BONUS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width of the random spread added on top of a tier's stat floor
    pub stat_variance: u32,
    /// Health every creature and encounter starts from
    pub health_base: u32,
    pub breeding: BreedingRules,
    pub tracing: TracingConfig,
    /// Optional RON catalog replacing the standard tables
    pub catalog_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stat_variance: 20,
            health_base: 50,
            breeding: BreedingRules::default(),
            tracing: TracingConfig::default(),
            catalog_path: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.stat_variance == 0 {
            return Err(EngineError::InvalidRange(0));
        }
        check_bound("stat_variance", self.stat_variance, MAX_STAT_VARIANCE)?;
        check_bound("health_base", self.health_base, MAX_HEALTH_BASE)?;
        self.breeding.validate()
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid engine config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron(source: &str) -> anyhow::Result<Self> {
        let config: Self = ron::from_str(source).context("invalid engine config RON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Load a config file; `.ron` and `.json` are supported.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EngineConfig> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => EngineConfig::from_ron(&source),
        Some("json") => EngineConfig::from_json(&source),
        other => bail!(
            "unsupported config format {:?} for {}",
            other.unwrap_or(""),
            path.display()
        ),
    };
    config.with_context(|| format!("in config {}", path.display()))
}
