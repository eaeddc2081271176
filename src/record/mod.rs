//! Generated entity records.
//!
//! Records are created once and never edited. Game-state changes (levels,
//! equipment, experience) live alongside a record, not inside it.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::hash::EntityHash;
use crate::rarity::RarityTier;

/// Numeric stat block. Health is absent on items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub intelligence: u32,
    pub luck: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
}

impl StatBlock {
    /// Core stats in a fixed order: attack, defense, speed, intelligence, luck
    pub fn core(&self) -> [u32; 5] {
        [
            self.attack,
            self.defense,
            self.speed,
            self.intelligence,
            self.luck,
        ]
    }

    pub fn from_core(core: [u32; 5], health: Option<u32>) -> Self {
        Self {
            attack: core[0],
            defense: core[1],
            speed: core[2],
            intelligence: core[3],
            luck: core[4],
            health,
        }
    }

    pub fn total(&self) -> u32 {
        self.core().iter().sum::<u32>() + self.health.unwrap_or(0)
    }
}

/// Inheritable creature trait categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureTrait {
    Color,
    Size,
    CreatureType,
    Element,
    Personality,
    Habitat,
    Pattern,
    Aura,
}

impl CreatureTrait {
    /// Resolution order, shared by generation and breeding
    pub const ALL: [CreatureTrait; 8] = [
        CreatureTrait::Color,
        CreatureTrait::Size,
        CreatureTrait::CreatureType,
        CreatureTrait::Element,
        CreatureTrait::Personality,
        CreatureTrait::Habitat,
        CreatureTrait::Pattern,
        CreatureTrait::Aura,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureTraits {
    pub color: String,
    pub size: String,
    pub creature_type: String,
    pub element: String,
    pub personality: String,
    pub habitat: String,
    pub pattern: String,
    pub aura: String,
}

impl CreatureTraits {
    pub fn get(&self, trait_kind: CreatureTrait) -> &str {
        match trait_kind {
            CreatureTrait::Color => &self.color,
            CreatureTrait::Size => &self.size,
            CreatureTrait::CreatureType => &self.creature_type,
            CreatureTrait::Element => &self.element,
            CreatureTrait::Personality => &self.personality,
            CreatureTrait::Habitat => &self.habitat,
            CreatureTrait::Pattern => &self.pattern,
            CreatureTrait::Aura => &self.aura,
        }
    }

    /// Build from values listed in `CreatureTrait::ALL` order
    pub fn from_ordered(values: [String; 8]) -> Self {
        let [color, size, creature_type, element, personality, habitat, pattern, aura] = values;
        Self {
            color,
            size,
            creature_type,
            element,
            personality,
            habitat,
            pattern,
            aura,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub hash: EntityHash,
    pub name: String,
    pub rarity: RarityTier,
    pub traits: CreatureTraits,
    pub special_features: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: StatBlock,
    pub generation: u32,
    pub generator_version: u32,
}

impl CreatureRecord {
    /// Reject records that could not have come out of the generator
    pub fn check_complete(&self) -> EngineResult<()> {
        let incomplete = |why: &str| {
            Err(EngineError::IneligibleParents(format!(
                "creature {} {why}",
                self.hash.short()
            )))
        };
        if self.name.trim().is_empty() {
            return incomplete("has no name");
        }
        if self.generation == 0 {
            return incomplete("has generation 0");
        }
        if self.special_features.is_empty() {
            return incomplete("has no special features");
        }
        if self.abilities.is_empty() {
            return incomplete("has no abilities");
        }
        if CreatureTrait::ALL
            .iter()
            .any(|t| self.traits.get(*t).trim().is_empty())
        {
            return incomplete("has an empty trait");
        }
        if self.stats.health.is_none() {
            return incomplete("has no health stat");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterTraits {
    pub color: String,
    pub size: String,
    pub creature_type: String,
    pub element: String,
    pub behavior: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub hash: EntityHash,
    pub environment: String,
    pub name: String,
    pub rarity: RarityTier,
    pub level: u32,
    pub traits: EncounterTraits,
    pub special_features: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: StatBlock,
    pub generator_version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTraits {
    pub slot: String,
    pub category: String,
    pub material: String,
    pub element: String,
    pub prefix: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub hash: EntityHash,
    pub environment: String,
    pub name: String,
    pub rarity: RarityTier,
    pub value: u32,
    pub traits: ItemTraits,
    pub special_features: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: StatBlock,
    pub generator_version: u32,
}

/// What to generate from a hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    Creature,
    WildEncounter { environment: String },
    Item { environment: String },
}

/// Any generated entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedEntity {
    Creature(CreatureRecord),
    WildEncounter(EncounterRecord),
    Item(ItemRecord),
}

impl GeneratedEntity {
    pub fn hash(&self) -> &EntityHash {
        match self {
            Self::Creature(r) => &r.hash,
            Self::WildEncounter(r) => &r.hash,
            Self::Item(r) => &r.hash,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Creature(r) => &r.name,
            Self::WildEncounter(r) => &r.name,
            Self::Item(r) => &r.name,
        }
    }

    pub fn rarity(&self) -> RarityTier {
        match self {
            Self::Creature(r) => r.rarity,
            Self::WildEncounter(r) => r.rarity,
            Self::Item(r) => r.rarity,
        }
    }

    pub fn special_features(&self) -> &[String] {
        match self {
            Self::Creature(r) => &r.special_features,
            Self::WildEncounter(r) => &r.special_features,
            Self::Item(r) => &r.special_features,
        }
    }

    pub fn abilities(&self) -> &[String] {
        match self {
            Self::Creature(r) => &r.abilities,
            Self::WildEncounter(r) => &r.abilities,
            Self::Item(r) => &r.abilities,
        }
    }

    pub fn stats(&self) -> &StatBlock {
        match self {
            Self::Creature(r) => &r.stats,
            Self::WildEncounter(r) => &r.stats,
            Self::Item(r) => &r.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_creature() -> CreatureRecord {
        CreatureRecord {
            hash: EntityHash::from_seed(["sample"]),
            name: "Brave Dragon".into(),
            rarity: RarityTier::Rare,
            traits: CreatureTraits {
                color: "Crimson".into(),
                size: "Large".into(),
                creature_type: "Dragon".into(),
                element: "Fire".into(),
                personality: "Brave".into(),
                habitat: "Volcano".into(),
                pattern: "Scaled".into(),
                aura: "Ember".into(),
            },
            special_features: vec!["Crystal Horns".into()],
            abilities: vec!["Flame Burst".into(), "Stone Skin".into()],
            stats: StatBlock::from_core([50, 40, 35, 30, 32], Some(120)),
            generation: 1,
            generator_version: 1,
        }
    }

    #[test]
    fn test_stat_block_core_order() {
        let stats = StatBlock::from_core([1, 2, 3, 4, 5], None);
        assert_eq!(stats.attack, 1);
        assert_eq!(stats.luck, 5);
        assert_eq!(stats.core(), [1, 2, 3, 4, 5]);
        assert_eq!(stats.total(), 15);
    }

    #[test]
    fn test_item_stats_omit_health_in_json() {
        let stats = StatBlock::from_core([1, 2, 3, 4, 5], None);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("health"));
    }

    #[test]
    fn test_complete_creature_passes() {
        sample_creature().check_complete().unwrap();
    }

    #[test]
    fn test_incomplete_creature_rejected() {
        let mut record = sample_creature();
        record.special_features.clear();
        assert!(matches!(
            record.check_complete(),
            Err(EngineError::IneligibleParents(_))
        ));

        let mut record = sample_creature();
        record.generation = 0;
        assert!(record.check_complete().is_err());

        let mut record = sample_creature();
        record.traits.aura = String::new();
        assert!(record.check_complete().is_err());
    }

    #[test]
    fn test_entity_json_is_tagged() {
        let entity = GeneratedEntity::Creature(sample_creature());
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["kind"], "creature");
        assert_eq!(json["rarity"], "Rare");
        assert_eq!(json["traits"]["creature_type"], "Dragon");
        assert_eq!(json["stats"]["health"], 120);
    }

    #[test]
    fn test_traits_get_matches_fields() {
        let traits = sample_creature().traits;
        assert_eq!(traits.get(CreatureTrait::Habitat), "Volcano");
        assert_eq!(traits.get(CreatureTrait::Aura), "Ember");
    }
}
