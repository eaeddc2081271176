//! Hatchery - Deterministic Generation Core
//!
//! Turns a 256-bit hash into a fully specified game entity, reproducibly and
//! without stored state:
//! - HashStream: one hash sliced into many bounded draws
//! - Weighted selection and the rarity ladder
//! - Creature, wild encounter and item generators over versioned tables
//! - Breeding inheritance (inherit / mutate per trait, lineage features)
//! - Monte-Carlo rarity census
//! - FFI bridge for host runtimes

pub mod breeding;
pub mod bridge;
pub mod catalog;
pub mod census;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod hash;
pub mod logging;
pub mod naming;
pub mod rarity;
pub mod record;
pub mod stream;
pub mod tables;
pub mod weighted;

pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use hash::EntityHash;
pub use rarity::RarityTier;
pub use record::{
    CreatureRecord, EncounterRecord, EntityKind, GeneratedEntity, ItemRecord, StatBlock,
};

/// Generate a creature from a hex hash with the standard catalog.
pub fn generate_creature(hash: &str) -> EngineResult<CreatureRecord> {
    Engine::standard().generate_creature(hash)
}

/// Generate a wild encounter native to `environment`.
pub fn generate_wild_encounter(environment: &str, hash: &str) -> EngineResult<EncounterRecord> {
    Engine::standard().generate_wild_encounter(environment, hash)
}

/// Generate an item found in `environment`.
pub fn generate_item(environment: &str, hash: &str) -> EngineResult<ItemRecord> {
    Engine::standard().generate_item(environment, hash)
}

/// Breed two creatures under a session hash.
pub fn breed(
    parent_a: &CreatureRecord,
    parent_b: &CreatureRecord,
    session_hash: &str,
) -> EngineResult<CreatureRecord> {
    Engine::standard().breed(parent_a, parent_b, session_hash)
}
