//! Engine facade - a catalog and a config bundled behind the public entry points.
//!
//! `Engine` holds no mutable state and is `Send + Sync`; share one instance
//! across request handlers. The free functions at the crate root use a
//! process-wide engine built from the standard catalog and default config.

use std::sync::OnceLock;

use crate::breeding::{self, BreedingOutcome};
use crate::catalog::Catalog;
use crate::census::{self, RarityCensus};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::generator;
use crate::hash::EntityHash;
use crate::record::{CreatureRecord, EncounterRecord, EntityKind, GeneratedEntity, ItemRecord};

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    config: EngineConfig,
}

static STANDARD_ENGINE: OnceLock<Engine> = OnceLock::new();

impl Engine {
    pub fn new(catalog: Catalog, config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        catalog.validate()?;
        Ok(Self { catalog, config })
    }

    /// Build from a config, loading its catalog file when one is named.
    pub fn from_config(config: EngineConfig) -> anyhow::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_ron_file(path)?,
            None => Catalog::standard(),
        };
        tracing::info!(
            catalog_version = catalog.version,
            environments = catalog.environments.len(),
            "engine configured"
        );
        Ok(Self::new(catalog, config)?)
    }

    /// Standard catalog with default config, built once per process
    pub fn standard() -> &'static Engine {
        STANDARD_ENGINE.get_or_init(|| Engine {
            catalog: Catalog::standard_ref().clone(),
            config: EngineConfig::default(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn generate(&self, hash: &str, kind: &EntityKind) -> EngineResult<GeneratedEntity> {
        let hash = EntityHash::parse(hash)?;
        generator::generate(&self.catalog, &self.config, &hash, kind)
    }

    pub fn generate_creature(&self, hash: &str) -> EngineResult<CreatureRecord> {
        let hash = EntityHash::parse(hash)?;
        generator::generate_creature(&self.catalog, &self.config, &hash)
    }

    pub fn generate_wild_encounter(
        &self,
        environment: &str,
        hash: &str,
    ) -> EngineResult<EncounterRecord> {
        let hash = EntityHash::parse(hash)?;
        generator::generate_wild_encounter(&self.catalog, &self.config, environment, &hash)
    }

    pub fn generate_item(&self, environment: &str, hash: &str) -> EngineResult<ItemRecord> {
        let hash = EntityHash::parse(hash)?;
        generator::generate_item(&self.catalog, &self.config, environment, &hash)
    }

    pub fn breed(
        &self,
        parent_a: &CreatureRecord,
        parent_b: &CreatureRecord,
        session_hash: &str,
    ) -> EngineResult<CreatureRecord> {
        let session = EntityHash::parse(session_hash)?;
        breeding::breed(&self.catalog, &self.config, parent_a, parent_b, &session)
    }

    pub fn breed_detailed(
        &self,
        parent_a: &CreatureRecord,
        parent_b: &CreatureRecord,
        session_hash: &str,
    ) -> EngineResult<BreedingOutcome> {
        let session = EntityHash::parse(session_hash)?;
        breeding::breed_detailed(&self.catalog, &self.config, parent_a, parent_b, &session)
    }

    pub fn rarity_census(&self, samples: u64, seed: u64) -> EngineResult<RarityCensus> {
        census::run_census(&self.catalog, &self.config, samples, seed)
    }
}
