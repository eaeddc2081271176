//! Attribute catalog - every table a generator draws from, defined once.
//!
//! `Catalog::standard()` is built from the frozen lists in `tables` and shared
//! process-wide. Custom catalogs can be loaded from RON for content testing;
//! their `version` is stamped on every record they produce.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use crate::error::{EngineError, EngineResult};
use crate::record::CreatureTrait;
use crate::stream::SlotCursor;
use crate::tables;
use crate::weighted::WeightedTable;

/// Ordered, immutable list of labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTable {
    pub name: String,
    pub entries: Vec<String>,
}

impl AttributeTable {
    pub fn new(name: &str, entries: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            entries: entries.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e == label)
    }

    pub fn require_non_empty(&self) -> EngineResult<()> {
        if self.is_empty() {
            return Err(EngineError::Generation(format!(
                "attribute table '{}' is empty",
                self.name
            )));
        }
        Ok(())
    }

    /// Consume one slot and return the selected label.
    pub fn pick(&self, cursor: &mut SlotCursor<'_>) -> EngineResult<String> {
        self.require_non_empty()?;
        let index = cursor.next_index(self.len())?;
        Ok(self.entries[index].clone())
    }

    /// Pick up to `count` distinct labels, one slot per label.
    ///
    /// A draw that lands on an index already taken moves forward to the next
    /// free index, so the walk always terminates. Asking for more labels than
    /// the table holds returns the whole table.
    pub fn pick_distinct(
        &self,
        cursor: &mut SlotCursor<'_>,
        count: usize,
    ) -> EngineResult<Vec<String>> {
        self.require_non_empty()?;
        let len = self.len();
        let target = count.min(len);
        let mut taken = vec![false; len];
        let mut picked = Vec::with_capacity(target);

        while picked.len() < target {
            let mut index = cursor.next_index(len)?;
            while taken[index] {
                index = (index + 1) % len;
            }
            taken[index] = true;
            picked.push(self.entries[index].clone());
        }
        Ok(picked)
    }
}

/// Per-environment element affinities and native materials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub name: String,
    pub elements: AttributeTable,
    pub materials: AttributeTable,
}

/// Item categories available to one equipment slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotProfile {
    pub slot: String,
    pub categories: AttributeTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub version: u32,
    pub colors: AttributeTable,
    pub sizes: AttributeTable,
    pub creature_types: AttributeTable,
    pub elements: AttributeTable,
    pub personalities: AttributeTable,
    pub habitats: AttributeTable,
    pub patterns: AttributeTable,
    pub auras: AttributeTable,
    pub special_features: AttributeTable,
    pub abilities: AttributeTable,
    pub behaviors: AttributeTable,
    pub item_prefixes: AttributeTable,
    pub item_properties: AttributeTable,
    pub equipment_slots: WeightedTable,
    pub slot_categories: Vec<SlotProfile>,
    pub environments: Vec<EnvironmentProfile>,
    pub creature_names: AttributeTable,
    pub encounter_names: AttributeTable,
    pub item_names: AttributeTable,
}

static STANDARD_CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Build the standard catalog from the frozen tables
    pub fn standard() -> Self {
        Self {
            version: tables::CATALOG_VERSION,
            colors: AttributeTable::new("colors", tables::COLORS),
            sizes: AttributeTable::new("sizes", tables::SIZES),
            creature_types: AttributeTable::new("creature_types", tables::CREATURE_TYPES),
            elements: AttributeTable::new("elements", tables::ELEMENTS),
            personalities: AttributeTable::new("personalities", tables::PERSONALITIES),
            habitats: AttributeTable::new("habitats", tables::HABITATS),
            patterns: AttributeTable::new("patterns", tables::PATTERNS),
            auras: AttributeTable::new("auras", tables::AURAS),
            special_features: AttributeTable::new("special_features", tables::SPECIAL_FEATURES),
            abilities: AttributeTable::new("abilities", tables::ABILITIES),
            behaviors: AttributeTable::new("behaviors", tables::ENCOUNTER_BEHAVIORS),
            item_prefixes: AttributeTable::new("item_prefixes", tables::ITEM_PREFIXES),
            item_properties: AttributeTable::new("item_properties", tables::ITEM_PROPERTIES),
            equipment_slots: WeightedTable::new("equipment_slots", tables::EQUIPMENT_SLOTS),
            slot_categories: tables::SLOT_CATEGORIES
                .iter()
                .map(|(slot, categories)| SlotProfile {
                    slot: slot.to_string(),
                    categories: AttributeTable::new(&format!("{slot} categories"), categories),
                })
                .collect(),
            environments: tables::ENVIRONMENTS
                .iter()
                .map(|(name, elements, materials)| EnvironmentProfile {
                    name: name.to_string(),
                    elements: AttributeTable::new(&format!("{name} elements"), elements),
                    materials: AttributeTable::new(&format!("{name} materials"), materials),
                })
                .collect(),
            creature_names: AttributeTable::new("creature_names", tables::CREATURE_NAME_TEMPLATES),
            encounter_names: AttributeTable::new(
                "encounter_names",
                tables::ENCOUNTER_NAME_TEMPLATES,
            ),
            item_names: AttributeTable::new("item_names", tables::ITEM_NAME_TEMPLATES),
        }
    }

    /// Process-wide standard catalog, built on first use
    pub fn standard_ref() -> &'static Catalog {
        STANDARD_CATALOG.get_or_init(Catalog::standard)
    }

    pub fn from_ron_str(source: &str) -> anyhow::Result<Self> {
        let catalog: Catalog = ron::from_str(source).context("failed to parse catalog RON")?;
        catalog.validate().context("catalog failed validation")?;
        Ok(catalog)
    }

    pub fn from_ron_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_ron_str(&source).with_context(|| format!("in catalog {}", path.display()))
    }

    pub fn to_ron_string(&self) -> anyhow::Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("failed to serialize catalog")
    }

    /// Tables every creature draw depends on
    pub fn creature_tables(&self) -> [&AttributeTable; 11] {
        [
            &self.colors,
            &self.sizes,
            &self.creature_types,
            &self.elements,
            &self.personalities,
            &self.habitats,
            &self.patterns,
            &self.auras,
            &self.special_features,
            &self.abilities,
            &self.creature_names,
        ]
    }

    /// Check every table is usable. Generators run the relevant subset of
    /// these checks before drawing anything.
    pub fn validate(&self) -> EngineResult<()> {
        for table in self.creature_tables() {
            table.require_non_empty()?;
        }
        for table in [
            &self.behaviors,
            &self.item_prefixes,
            &self.item_properties,
            &self.encounter_names,
            &self.item_names,
        ] {
            table.require_non_empty()?;
        }
        if self.equipment_slots.total_weight() == 0 {
            return Err(EngineError::Generation(
                "equipment_slots has no selectable entries".into(),
            ));
        }
        for entry in &self.equipment_slots.entries {
            self.categories_for_slot(&entry.label)?.require_non_empty()?;
        }
        if self.environments.is_empty() {
            return Err(EngineError::Generation("no environments configured".into()));
        }
        for env in &self.environments {
            env.elements.require_non_empty()?;
            env.materials.require_non_empty()?;
        }
        Ok(())
    }

    /// Case-insensitive environment lookup
    pub fn environment(&self, name: &str) -> EngineResult<&EnvironmentProfile> {
        self.environments
            .iter()
            .find(|env| env.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::UnknownEnvironment(name.to_string()))
    }

    pub fn environment_names(&self) -> Vec<&str> {
        self.environments.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn categories_for_slot(&self, slot: &str) -> EngineResult<&AttributeTable> {
        self.slot_categories
            .iter()
            .find(|profile| profile.slot == slot)
            .map(|profile| &profile.categories)
            .ok_or_else(|| {
                EngineError::Generation(format!("no item categories for slot '{slot}'"))
            })
    }

    /// The table a creature trait is drawn from, at generation or mutation
    pub fn trait_table(&self, trait_kind: CreatureTrait) -> &AttributeTable {
        match trait_kind {
            CreatureTrait::Color => &self.colors,
            CreatureTrait::Size => &self.sizes,
            CreatureTrait::CreatureType => &self.creature_types,
            CreatureTrait::Element => &self.elements,
            CreatureTrait::Personality => &self.personalities,
            CreatureTrait::Habitat => &self.habitats,
            CreatureTrait::Pattern => &self.patterns,
            CreatureTrait::Aura => &self.auras,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::EntityHash;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.version, tables::CATALOG_VERSION);
        catalog.validate().unwrap();
    }

    #[test]
    fn test_standard_tables_have_no_duplicates() {
        let catalog = Catalog::standard();
        for table in catalog.creature_tables() {
            let mut sorted = table.entries.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), table.len(), "duplicate in {}", table.name);
        }
    }

    #[test]
    fn test_feature_tables_cover_top_tier() {
        use crate::rarity::RarityTier;
        let catalog = Catalog::standard();
        let top = RarityTier::Transcendent;
        assert!(catalog.special_features.len() >= top.feature_count());
        assert!(catalog.abilities.len() >= top.ability_count());
    }

    #[test]
    fn test_environment_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.environment("forest").unwrap().name, "Forest");
        assert!(matches!(
            catalog.environment("Moon"),
            Err(EngineError::UnknownEnvironment(_))
        ));
    }

    #[test]
    fn test_pick_distinct_on_zero_hash_steps_forward() {
        let table = AttributeTable::new("t", &["a", "b", "c", "d"]);
        let zero = EntityHash::zero();
        let mut cursor = SlotCursor::new(&zero);
        let picked = table.pick_distinct(&mut cursor, 3).unwrap();
        assert_eq!(picked, vec!["a", "b", "c"]);
        assert_eq!(cursor.consumed(), 3);
    }

    #[test]
    fn test_pick_distinct_stops_when_exhausted() {
        let table = AttributeTable::new("t", &["a", "b"]);
        let hash = EntityHash::from_seed(["exhaust"]);
        let mut cursor = SlotCursor::new(&hash);
        let picked = table.pick_distinct(&mut cursor, 5).unwrap();
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);
    }

    #[test]
    fn test_empty_table_is_generation_error() {
        let table = AttributeTable::new("special_features", &[]);
        let zero = EntityHash::zero();
        let mut cursor = SlotCursor::new(&zero);
        let err = table.pick_distinct(&mut cursor, 1).unwrap_err();
        assert!(matches!(err, EngineError::Generation(_)));
        assert!(err.to_string().contains("special_features"));
    }

    #[test]
    fn test_ron_roundtrip() {
        let catalog = Catalog::standard();
        let ron = catalog.to_ron_string().unwrap();
        let back = Catalog::from_ron_str(&ron).unwrap();
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_ron_rejects_invalid_catalog() {
        let mut catalog = Catalog::standard();
        catalog.auras.entries.clear();
        let ron = catalog.to_ron_string().unwrap();
        assert!(Catalog::from_ron_str(&ron).is_err());
    }
}
