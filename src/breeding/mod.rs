//! Breeding inheritance.
//!
//! Two parent creatures plus a session hash produce exactly one offspring.
//! Every trait is resolved on its own: keep parent A's value, keep parent B's,
//! or mutate to a fresh draw from the same table generation uses.
//!
//! Session hash slots:
//!   0..16   per trait in `CreatureTrait::ALL` order: outcome draw, mutation draw
//!   16      rarity promotion (mod 100)
//!   17..23  jitter for attack, defense, speed, intelligence, luck, health
//!   23      name template
//!
//! The mutation draw is consumed even when the trait is inherited so that
//! later slots never shift.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::config::{BreedingRules, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::hash::EntityHash;
use crate::naming::pick_name;
use crate::rarity::{RarityTier, ABILITY_HARD_CAP};
use crate::record::{CreatureRecord, CreatureTrait, CreatureTraits, StatBlock};
use crate::stream::SlotCursor;
use crate::weighted::{select_weighted, WeightedEntry};

/// How a single trait was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraitOutcome {
    InheritA,
    InheritB,
    Mutate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitResolution {
    pub trait_kind: CreatureTrait,
    pub outcome: TraitOutcome,
    pub value: String,
}

/// Offspring plus the per-trait decisions that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedingOutcome {
    pub offspring: CreatureRecord,
    pub resolutions: Vec<TraitResolution>,
    pub promoted: bool,
}

impl BreedingOutcome {
    pub fn mutations(&self) -> impl Iterator<Item = &TraitResolution> {
        self.resolutions
            .iter()
            .filter(|r| r.outcome == TraitOutcome::Mutate)
    }
}

/// Derive a session hash from the parents and caller-supplied salt
/// (e.g. the breeding request id).
pub fn session_hash(parent_a: &CreatureRecord, parent_b: &CreatureRecord, salt: &[u8]) -> EntityHash {
    EntityHash::from_seed([
        b"breed".as_slice(),
        parent_a.hash.as_bytes().as_slice(),
        parent_b.hash.as_bytes().as_slice(),
        salt,
    ])
}

fn check_parents(parent_a: &CreatureRecord, parent_b: &CreatureRecord) -> EngineResult<()> {
    parent_a.check_complete()?;
    parent_b.check_complete()?;
    if parent_a.hash == parent_b.hash {
        return Err(EngineError::IneligibleParents(format!(
            "creature {} cannot breed with itself",
            parent_a.hash.short()
        )));
    }
    Ok(())
}

/// One past the older parent's generation
fn offspring_generation(parent_a: &CreatureRecord, parent_b: &CreatureRecord) -> EngineResult<u32> {
    parent_a
        .generation
        .max(parent_b.generation)
        .checked_add(1)
        .ok_or_else(|| EngineError::IneligibleParents("generation counter exhausted".into()))
}

fn outcome_table(rules: &BreedingRules) -> [WeightedEntry<TraitOutcome>; 3] {
    [
        WeightedEntry::new(TraitOutcome::InheritA, rules.inherit_a_weight),
        WeightedEntry::new(TraitOutcome::InheritB, rules.inherit_b_weight),
        WeightedEntry::new(TraitOutcome::Mutate, rules.mutate_weight),
    ]
}

/// Order-preserving union of both lists without duplicates, cut at `cap`
fn lineage_union(a: &[String], b: &[String], cap: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(cap);
    for label in a.iter().chain(b) {
        if merged.len() >= cap {
            break;
        }
        if !merged.contains(label) {
            merged.push(label.clone());
        }
    }
    merged
}

/// `floor((a + b) / 2) + bonus + jitter`, saturating
fn inherited_stat(a: u32, b: u32, bonus: u32, jitter: u32) -> u32 {
    let average = ((a as u64 + b as u64) / 2) as u32;
    average.saturating_add(bonus).saturating_add(jitter)
}

/// Breed two creatures and report how each trait was resolved.
pub fn breed_detailed(
    catalog: &Catalog,
    config: &EngineConfig,
    parent_a: &CreatureRecord,
    parent_b: &CreatureRecord,
    session: &EntityHash,
) -> EngineResult<BreedingOutcome> {
    check_parents(parent_a, parent_b)?;
    let generation = offspring_generation(parent_a, parent_b)?;
    let rules = &config.breeding;
    rules.validate()?;
    for trait_kind in CreatureTrait::ALL {
        catalog.trait_table(trait_kind).require_non_empty()?;
    }
    catalog.creature_names.require_non_empty()?;

    let mut cursor = SlotCursor::new(session);
    let outcomes = outcome_table(rules);

    let mut resolutions = Vec::with_capacity(CreatureTrait::ALL.len());
    let mut values: [String; 8] = Default::default();
    for (value, trait_kind) in values.iter_mut().zip(CreatureTrait::ALL) {
        let choice = cursor.draw(rules.choice_total())?;
        let mutation = catalog.trait_table(trait_kind).pick(&mut cursor)?;
        let outcome = *select_weighted(&outcomes, choice as u64)?;

        *value = match outcome {
            TraitOutcome::InheritA => parent_a.traits.get(trait_kind).to_string(),
            TraitOutcome::InheritB => parent_b.traits.get(trait_kind).to_string(),
            TraitOutcome::Mutate => mutation,
        };
        trace!(?trait_kind, ?outcome, value = %value, "trait resolved");
        resolutions.push(TraitResolution {
            trait_kind,
            outcome,
            value: value.clone(),
        });
    }
    let traits = CreatureTraits::from_ordered(values);

    let best = parent_a.rarity.max(parent_b.rarity);
    let promotion_roll = cursor.draw(100)?;
    let promoted = promotion_roll >= 100 - rules.promotion_chance;
    let rarity = if promoted { best.next() } else { best };

    let special_features = lineage_union(
        &parent_a.special_features,
        &parent_b.special_features,
        rarity.feature_count() + rules.lineage_bonus,
    );
    let abilities = lineage_union(
        &parent_a.abilities,
        &parent_b.abilities,
        (rarity.ability_count() + rules.lineage_bonus).min(ABILITY_HARD_CAP),
    );

    let stats = inherit_stats(&mut cursor, rules, rarity, &parent_a.stats, &parent_b.stats)?;

    let name = pick_name(
        &catalog.creature_names,
        &mut cursor,
        &[
            ("personality", traits.personality.as_str()),
            ("element", traits.element.as_str()),
            ("rarity", rarity.name()),
            ("color", traits.color.as_str()),
            ("type", traits.creature_type.as_str()),
            ("size", traits.size.as_str()),
        ],
    )?;

    debug!(
        session = %session.short(),
        parent_a = %parent_a.hash.short(),
        parent_b = %parent_b.hash.short(),
        %rarity,
        promoted,
        generation,
        name = %name,
        "bred offspring"
    );

    Ok(BreedingOutcome {
        offspring: CreatureRecord {
            hash: *session,
            name,
            rarity,
            traits,
            special_features,
            abilities,
            stats,
            generation,
            generator_version: catalog.version,
        },
        resolutions,
        promoted,
    })
}

fn inherit_stats(
    cursor: &mut SlotCursor<'_>,
    rules: &BreedingRules,
    rarity: RarityTier,
    a: &StatBlock,
    b: &StatBlock,
) -> EngineResult<StatBlock> {
    let bonus = rules
        .tier_bonus_per_rank
        .saturating_mul(rarity.rank() as u32);
    let jitter_range = rules.jitter.saturating_add(1);

    let (a_core, b_core) = (a.core(), b.core());
    let mut core = [0u32; 5];
    for (i, stat) in core.iter_mut().enumerate() {
        *stat = inherited_stat(a_core[i], b_core[i], bonus, cursor.draw(jitter_range)?);
    }
    let health = inherited_stat(
        a.health.unwrap_or(0),
        b.health.unwrap_or(0),
        bonus,
        cursor.draw(jitter_range)?,
    );
    Ok(StatBlock::from_core(core, Some(health)))
}

/// Breed two creatures; see `breed_detailed` for the per-trait report.
pub fn breed(
    catalog: &Catalog,
    config: &EngineConfig,
    parent_a: &CreatureRecord,
    parent_b: &CreatureRecord,
    session: &EntityHash,
) -> EngineResult<CreatureRecord> {
    breed_detailed(catalog, config, parent_a, parent_b, session).map(|o| o.offspring)
}
