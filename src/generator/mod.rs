//! Attribute generators: creature, wild encounter, item.
//!
//! Each generator walks a `SlotCursor` through a fixed sequence. Changing the
//! order below changes what every stored hash means, so treat it like the
//! tables themselves.
//!
//! Creature slots:
//!   0..8    color, size, type, element, personality, habitat, pattern, aura
//!   8       rarity (mod 10,000)
//!   next    one per special feature, then one per ability
//!   next    attack, defense, speed, intelligence, luck, health
//!   last    name template
//!
//! Wild encounter slots:
//!   0..6    color, size, type, element (environment affinity), behavior, pattern
//!   6       rarity
//!   7       level spread
//!   next    features, abilities, five core stats, health, name template
//!
//! Item slots:
//!   0..6    equipment slot (weighted), category, material (environment),
//!           element, prefix, color
//!   6       rarity
//!   7       coin value spread
//!   next    properties, abilities, five core stats, name template

use tracing::{debug, trace};

use crate::catalog::{AttributeTable, Catalog};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::hash::EntityHash;
use crate::naming::pick_name;
use crate::rarity::{classify, RarityTier, RARITY_TOTAL_WEIGHT};
use crate::record::{
    CreatureRecord, CreatureTrait, CreatureTraits, EncounterRecord, EncounterTraits, EntityKind,
    GeneratedEntity, ItemRecord, ItemTraits, StatBlock,
};
use crate::stream::SlotCursor;

/// Generation number of a freshly generated creature
pub const FIRST_GENERATION: u32 = 1;

/// Levels per rarity rank for wild encounters
pub const LEVELS_PER_RANK: u32 = 5;

/// Base coin value per rarity rank
const ITEM_BASE_VALUE: [u32; 7] = [10, 25, 60, 150, 400, 1000, 2500];

fn require_tables(tables: &[&AttributeTable]) -> EngineResult<()> {
    tables.iter().try_for_each(|t| t.require_non_empty())
}

fn draw_rarity(cursor: &mut SlotCursor<'_>) -> EngineResult<RarityTier> {
    Ok(classify(cursor.draw(RARITY_TOTAL_WEIGHT)?))
}

/// Five core stats, each `floor + draw(variance)`
fn draw_core_stats(
    cursor: &mut SlotCursor<'_>,
    tier: RarityTier,
    variance: u32,
) -> EngineResult<[u32; 5]> {
    let floor = tier.stat_floor();
    let mut core = [0u32; 5];
    for stat in core.iter_mut() {
        *stat = floor + cursor.draw(variance)?;
    }
    Ok(core)
}

fn draw_health(
    cursor: &mut SlotCursor<'_>,
    tier: RarityTier,
    config: &EngineConfig,
) -> EngineResult<u32> {
    let spread = config.stat_variance.saturating_mul(2);
    Ok(config.health_base + 2 * tier.stat_floor() + cursor.draw(spread)?)
}

pub fn generate_creature(
    catalog: &Catalog,
    config: &EngineConfig,
    hash: &EntityHash,
) -> EngineResult<CreatureRecord> {
    config.validate()?;
    require_tables(&catalog.creature_tables())?;
    let mut cursor = SlotCursor::new(hash);

    let mut values: [String; 8] = Default::default();
    for (value, trait_kind) in values.iter_mut().zip(CreatureTrait::ALL) {
        *value = catalog.trait_table(trait_kind).pick(&mut cursor)?;
    }
    let traits = CreatureTraits::from_ordered(values);

    let rarity = draw_rarity(&mut cursor)?;
    let special_features = catalog
        .special_features
        .pick_distinct(&mut cursor, rarity.feature_count())?;
    let abilities = catalog
        .abilities
        .pick_distinct(&mut cursor, rarity.ability_count())?;

    let core = draw_core_stats(&mut cursor, rarity, config.stat_variance)?;
    let health = draw_health(&mut cursor, rarity, config)?;
    let stats = StatBlock::from_core(core, Some(health));

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
        hash = %hash.short(),
        %rarity,
        name = %name,
        slots = cursor.consumed(),
        "generated creature"
    );

    Ok(CreatureRecord {
        hash: *hash,
        name,
        rarity,
        traits,
        special_features,
        abilities,
        stats,
        generation: FIRST_GENERATION,
        generator_version: catalog.version,
    })
}

pub fn generate_wild_encounter(
    catalog: &Catalog,
    config: &EngineConfig,
    environment: &str,
    hash: &EntityHash,
) -> EngineResult<EncounterRecord> {
    config.validate()?;
    let env = catalog.environment(environment)?;
    require_tables(&[
        &catalog.colors,
        &catalog.sizes,
        &catalog.creature_types,
        &env.elements,
        &catalog.behaviors,
        &catalog.patterns,
        &catalog.special_features,
        &catalog.abilities,
        &catalog.encounter_names,
    ])?;
    let mut cursor = SlotCursor::new(hash);

    let traits = EncounterTraits {
        color: catalog.colors.pick(&mut cursor)?,
        size: catalog.sizes.pick(&mut cursor)?,
        creature_type: catalog.creature_types.pick(&mut cursor)?,
        element: env.elements.pick(&mut cursor)?,
        behavior: catalog.behaviors.pick(&mut cursor)?,
        pattern: catalog.patterns.pick(&mut cursor)?,
    };

    let rarity = draw_rarity(&mut cursor)?;
    let level = 1 + LEVELS_PER_RANK * rarity.rank() as u32 + cursor.draw(LEVELS_PER_RANK)?;

    let special_features = catalog
        .special_features
        .pick_distinct(&mut cursor, rarity.feature_count())?;
    let abilities = catalog
        .abilities
        .pick_distinct(&mut cursor, rarity.ability_count())?;

    let core = draw_core_stats(&mut cursor, rarity, config.stat_variance)?;
    let health = draw_health(&mut cursor, rarity, config)?;

    let name = pick_name(
        &catalog.encounter_names,
        &mut cursor,
        &[
            ("element", traits.element.as_str()),
            ("type", traits.creature_type.as_str()),
            ("behavior", traits.behavior.as_str()),
            ("size", traits.size.as_str()),
            ("color", traits.color.as_str()),
            ("environment", env.name.as_str()),
            ("rarity", rarity.name()),
        ],
    )?;

    debug!(
        hash = %hash.short(),
        environment = %env.name,
        %rarity,
        level,
        name = %name,
        "generated wild encounter"
    );

    Ok(EncounterRecord {
        hash: *hash,
        environment: env.name.clone(),
        name,
        rarity,
        level,
        traits,
        special_features,
        abilities,
        stats: StatBlock::from_core(core, Some(health)),
        generator_version: catalog.version,
    })
}

pub fn generate_item(
    catalog: &Catalog,
    config: &EngineConfig,
    environment: &str,
    hash: &EntityHash,
) -> EngineResult<ItemRecord> {
    config.validate()?;
    let env = catalog.environment(environment)?;
    require_tables(&[
        &env.materials,
        &catalog.elements,
        &catalog.item_prefixes,
        &catalog.colors,
        &catalog.item_properties,
        &catalog.abilities,
        &catalog.item_names,
    ])?;
    for entry in &catalog.equipment_slots.entries {
        catalog.categories_for_slot(&entry.label)?.require_non_empty()?;
    }
    let slot_total = u32::try_from(catalog.equipment_slots.total_weight())
        .map_err(|_| EngineError::Generation("equipment slot weights overflow".into()))?;
    if slot_total == 0 {
        return Err(EngineError::Generation(
            "equipment_slots has no selectable entries".into(),
        ));
    }

    let mut cursor = SlotCursor::new(hash);

    let slot = catalog
        .equipment_slots
        .select(cursor.draw(slot_total)? as u64)?
        .to_string();
    let category = catalog.categories_for_slot(&slot)?.pick(&mut cursor)?;
    let traits = ItemTraits {
        slot,
        category,
        material: env.materials.pick(&mut cursor)?,
        element: catalog.elements.pick(&mut cursor)?,
        prefix: catalog.item_prefixes.pick(&mut cursor)?,
        color: catalog.colors.pick(&mut cursor)?,
    };
    trace!(hash = %hash.short(), slot = %traits.slot, category = %traits.category, "item traits");

    let rarity = draw_rarity(&mut cursor)?;
    let base_value = ITEM_BASE_VALUE[rarity.rank()];
    let value = base_value + cursor.draw(base_value)?;

    let special_features = catalog
        .item_properties
        .pick_distinct(&mut cursor, rarity.feature_count())?;
    let abilities = catalog
        .abilities
        .pick_distinct(&mut cursor, rarity.ability_count())?;
    let core = draw_core_stats(&mut cursor, rarity, config.stat_variance)?;

    let name = pick_name(
        &catalog.item_names,
        &mut cursor,
        &[
            ("prefix", traits.prefix.as_str()),
            ("material", traits.material.as_str()),
            ("category", traits.category.as_str()),
            ("element", traits.element.as_str()),
            ("color", traits.color.as_str()),
            ("slot", traits.slot.as_str()),
            ("rarity", rarity.name()),
        ],
    )?;

    debug!(
        hash = %hash.short(),
        environment = %env.name,
        %rarity,
        value,
        name = %name,
        "generated item"
    );

    Ok(ItemRecord {
        hash: *hash,
        environment: env.name.clone(),
        name,
        rarity,
        value,
        traits,
        special_features,
        abilities,
        stats: StatBlock::from_core(core, None),
        generator_version: catalog.version,
    })
}

/// Generate whichever entity `kind` names.
pub fn generate(
    catalog: &Catalog,
    config: &EngineConfig,
    hash: &EntityHash,
    kind: &EntityKind,
) -> EngineResult<GeneratedEntity> {
    match kind {
        EntityKind::Creature => {
            generate_creature(catalog, config, hash).map(GeneratedEntity::Creature)
        }
        EntityKind::WildEncounter { environment } => {
            generate_wild_encounter(catalog, config, environment, hash)
                .map(GeneratedEntity::WildEncounter)
        }
        EntityKind::Item { environment } => {
            generate_item(catalog, config, environment, hash).map(GeneratedEntity::Item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> (Catalog, EngineConfig) {
        (Catalog::standard(), EngineConfig::default())
    }

    fn has_duplicates(list: &[String]) -> bool {
        let mut sorted = list.to_vec();
        sorted.sort();
        sorted.windows(2).any(|w| w[0] == w[1])
    }

    #[test]
    fn test_zero_hash_creature_takes_first_entries() {
        let (catalog, config) = standard();
        let creature = generate_creature(&catalog, &config, &EntityHash::zero()).unwrap();

        assert_eq!(creature.rarity, RarityTier::Common);
        assert_eq!(creature.traits.color, "Crimson");
        assert_eq!(creature.traits.creature_type, "Dragon");
        assert_eq!(creature.traits.aura, "Radiant");
        assert_eq!(creature.special_features, vec!["Crystal Horns"]);
        assert_eq!(creature.abilities, vec!["Flame Burst", "Tidal Wave"]);
        assert_eq!(creature.stats, StatBlock::from_core([10; 5], Some(70)));
        assert_eq!(creature.name, "Brave Dragon");
        assert_eq!(creature.generation, FIRST_GENERATION);
    }

    #[test]
    fn test_creature_deterministic() {
        let (catalog, config) = standard();
        let hash = EntityHash::from_seed(["determinism"]);
        let a = generate_creature(&catalog, &config, &hash).unwrap();
        let b = generate_creature(&catalog, &config, &hash).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_rarity_scaled_lists_and_stats() {
        let (catalog, config) = standard();
        for i in 0..500u32 {
            let hash = EntityHash::from_seed([i.to_le_bytes()]);
            let creature = generate_creature(&catalog, &config, &hash).unwrap();
            let tier = creature.rarity;

            assert_eq!(creature.special_features.len(), tier.feature_count());
            assert_eq!(creature.abilities.len(), tier.ability_count());
            assert!(!has_duplicates(&creature.special_features));
            assert!(!has_duplicates(&creature.abilities));
            for stat in creature.stats.core() {
                assert!(stat >= tier.stat_floor());
                assert!(stat < tier.stat_floor() + config.stat_variance);
            }
        }
    }

    #[test]
    fn test_empty_feature_table_fails() {
        let mut catalog = Catalog::standard();
        catalog.special_features.entries.clear();
        let err =
            generate_creature(&catalog, &EngineConfig::default(), &EntityHash::zero()).unwrap_err();
        assert!(matches!(err, EngineError::Generation(_)));
    }

    #[test]
    fn test_small_feature_table_stops_early() {
        let mut catalog = Catalog::standard();
        catalog.special_features = AttributeTable::new("special_features", &["Only Horn"]);
        let config = EngineConfig::default();
        for i in 0..200u32 {
            let hash = EntityHash::from_seed([i.to_be_bytes()]);
            let creature = generate_creature(&catalog, &config, &hash).unwrap();
            assert_eq!(creature.special_features, vec!["Only Horn"]);
        }
    }

    #[test]
    fn test_encounter_uses_environment_affinity() {
        let (catalog, config) = standard();
        let env = catalog.environment("Volcano").unwrap().clone();
        for i in 0..100u32 {
            let hash = EntityHash::from_seed([b"enc".as_slice(), &i.to_le_bytes()]);
            let encounter = generate_wild_encounter(&catalog, &config, "volcano", &hash).unwrap();
            assert_eq!(encounter.environment, "Volcano");
            assert!(env.elements.contains(&encounter.traits.element));
            let rank = encounter.rarity.rank() as u32;
            assert!(encounter.level > LEVELS_PER_RANK * rank);
            assert!(encounter.level <= LEVELS_PER_RANK * (rank + 1));
            assert!(encounter.stats.health.is_some());
        }
    }

    #[test]
    fn test_zero_hash_encounter() {
        let (catalog, config) = standard();
        let encounter =
            generate_wild_encounter(&catalog, &config, "Forest", &EntityHash::zero()).unwrap();
        assert_eq!(encounter.traits.element, "Nature");
        assert_eq!(encounter.level, 1);
        assert_eq!(encounter.name, "Wild Nature Dragon");
    }

    #[test]
    fn test_unknown_environment() {
        let (catalog, config) = standard();
        let err = generate_item(&catalog, &config, "Moon", &EntityHash::zero()).unwrap_err();
        assert_eq!(err, EngineError::UnknownEnvironment("Moon".into()));
    }

    #[test]
    fn test_item_category_matches_slot() {
        let (catalog, config) = standard();
        for i in 0..200u32 {
            let hash = EntityHash::from_seed([b"item".as_slice(), &i.to_le_bytes()]);
            let item = generate_item(&catalog, &config, "Mountain", &hash).unwrap();
            let categories = catalog.categories_for_slot(&item.traits.slot).unwrap();
            assert!(categories.contains(&item.traits.category));
            assert!(item.stats.health.is_none());
            let base = ITEM_BASE_VALUE[item.rarity.rank()];
            assert!(item.value >= base && item.value < base * 2);
            assert!(!has_duplicates(&item.special_features));
        }
    }

    #[test]
    fn test_zero_hash_item() {
        let (catalog, config) = standard();
        let item = generate_item(&catalog, &config, "Ocean", &EntityHash::zero()).unwrap();
        assert_eq!(item.traits.slot, "Weapon");
        assert_eq!(item.traits.category, "Sword");
        assert_eq!(item.traits.material, "Coral");
        assert_eq!(item.name, "Ancient Coral Sword");
        assert_eq!(item.value, 10);
    }

    #[test]
    fn test_oversized_config_is_generation_error() {
        let catalog = Catalog::standard();
        let hash = EntityHash::from_seed(["overflow"]);

        let mut config = EngineConfig::default();
        config.health_base = u32::MAX - 10;
        assert!(matches!(
            generate_creature(&catalog, &config, &hash),
            Err(EngineError::Generation(_))
        ));
        assert!(matches!(
            generate_wild_encounter(&catalog, &config, "Forest", &hash),
            Err(EngineError::Generation(_))
        ));

        let mut config = EngineConfig::default();
        config.stat_variance = u32::MAX;
        assert!(matches!(
            generate_item(&catalog, &config, "Forest", &hash),
            Err(EngineError::Generation(_))
        ));
    }

    #[test]
    fn test_generate_dispatches_on_kind() {
        let (catalog, config) = standard();
        let hash = EntityHash::from_seed(["dispatch"]);
        let entity = generate(
            &catalog,
            &config,
            &hash,
            &EntityKind::Item {
                environment: "Desert".into(),
            },
        )
        .unwrap();
        assert!(matches!(entity, GeneratedEntity::Item(_)));
        assert_eq!(entity.hash(), &hash);
    }
}
