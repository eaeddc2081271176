//! Monte-Carlo rarity census.
//!
//! Generates creatures from uniformly random hashes and compares the observed
//! tier frequencies with the configured weights. Used to audit catalog and
//! ladder changes before they ship; the engine itself never calls it.

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::generator::generate_creature;
use crate::hash::EntityHash;
use crate::logging::TimingSpan;
use crate::rarity::RarityTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierFrequency {
    pub tier: RarityTier,
    pub count: u64,
    pub observed: f64,
    pub expected: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityCensus {
    pub samples: u64,
    pub seed: u64,
    pub tiers: Vec<TierFrequency>,
    /// Largest |observed - expected| across tiers
    pub max_deviation: f64,
}

impl RarityCensus {
    pub fn within_tolerance(&self, tolerance: f64) -> bool {
        self.max_deviation <= tolerance
    }

    pub fn tier(&self, tier: RarityTier) -> Option<&TierFrequency> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Hashes classified per parallel batch; bounds census memory
pub const CENSUS_CHUNK: usize = 16_384;

fn next_hash(rng: &mut Xoshiro256StarStar) -> EntityHash {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    EntityHash::from_bytes(bytes)
}

/// Reproducible stream of uniformly random hashes
pub fn sample_hashes(samples: u64, seed: u64) -> Vec<EntityHash> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    (0..samples).map(|_| next_hash(&mut rng)).collect()
}

pub fn run_census(
    catalog: &Catalog,
    config: &EngineConfig,
    samples: u64,
    seed: u64,
) -> EngineResult<RarityCensus> {
    if samples == 0 {
        return Err(EngineError::InvalidRange(0));
    }
    let _timing = TimingSpan::new("rarity_census");
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let mut counts = [0u64; RarityTier::ALL.len()];
    let mut chunk = Vec::with_capacity(samples.min(CENSUS_CHUNK as u64) as usize);

    let mut remaining = samples;
    while remaining > 0 {
        let batch = remaining.min(CENSUS_CHUNK as u64);
        chunk.clear();
        chunk.extend((0..batch).map(|_| next_hash(&mut rng)));

        let rarities: Vec<RarityTier> = chunk
            .par_iter()
            .map(|hash| generate_creature(catalog, config, hash).map(|c| c.rarity))
            .collect::<EngineResult<Vec<_>>>()?;
        for rarity in &rarities {
            counts[rarity.rank()] += 1;
        }
        remaining -= batch;
    }

    let tiers: Vec<TierFrequency> = RarityTier::ALL
        .iter()
        .map(|tier| {
            let count = counts[tier.rank()];
            TierFrequency {
                tier: *tier,
                count,
                observed: count as f64 / samples as f64,
                expected: tier.probability(),
            }
        })
        .collect();

    let max_deviation = tiers
        .iter()
        .map(|t| (t.observed - t.expected).abs())
        .fold(0.0_f64, f64::max);

    info!(samples, seed, max_deviation, "rarity census complete");

    Ok(RarityCensus {
        samples,
        seed,
        tiers,
        max_deviation,
    })
}
