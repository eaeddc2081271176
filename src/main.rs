//! `hatchery` - command line front end for the generation engine.
//!
//! Prints records as JSON so the output can be piped into fixtures or
//! compared across builds.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use hatchery_core::config::{load_config, EngineConfig};
use hatchery_core::logging::init_tracing;
use hatchery_core::record::EntityKind;
use hatchery_core::{CreatureRecord, Engine, EntityHash};

#[derive(Parser, Debug)]
#[command(name = "hatchery", version, about = "Deterministic creature, item and encounter generation")]
struct Cli {
    /// Engine config (.ron or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a creature from a 64 character hex hash
    Creature { hash: String },
    /// Generate a wild encounter native to an environment
    Encounter { environment: String, hash: String },
    /// Generate an item found in an environment
    Item { environment: String, hash: String },
    /// Breed two creature records (JSON files)
    Breed {
        parent_a: PathBuf,
        parent_b: PathBuf,
        /// Session hash; derived from the parents and --salt when omitted
        #[arg(long)]
        session: Option<String>,
        #[arg(long, default_value = "")]
        salt: String,
    },
    /// Derive an entity hash from seed material
    Hash { parts: Vec<String> },
    /// Audit the rarity distribution over random hashes
    Census {
        #[arg(long, default_value_t = 100_000)]
        samples: u64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List the environments in the active catalog
    Environments,
}

fn read_creature(path: &Path) -> anyhow::Result<CreatureRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("{} is not a creature record", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    init_tracing(&config.tracing);
    let engine = Engine::from_config(config)?;

    match cli.command {
        Command::Creature { hash } => {
            let entity = engine.generate(&hash, &EntityKind::Creature)?;
            print_json(&entity, cli.pretty)
        }
        Command::Encounter { environment, hash } => {
            let entity = engine.generate(&hash, &EntityKind::WildEncounter { environment })?;
            print_json(&entity, cli.pretty)
        }
        Command::Item { environment, hash } => {
            let entity = engine.generate(&hash, &EntityKind::Item { environment })?;
            print_json(&entity, cli.pretty)
        }
        Command::Breed {
            parent_a,
            parent_b,
            session,
            salt,
        } => {
            let a = read_creature(&parent_a)?;
            let b = read_creature(&parent_b)?;
            let session = match session {
                Some(hex) => hex,
                None => hatchery_core::breeding::session_hash(&a, &b, salt.as_bytes()).to_string(),
            };
            let outcome = engine.breed_detailed(&a, &b, &session)?;
            print_json(&outcome, cli.pretty)
        }
        Command::Hash { parts } => {
            let hash = EntityHash::from_seed(parts.iter().map(String::as_bytes));
            println!("{hash}");
            Ok(())
        }
        Command::Census { samples, seed } => {
            let census = engine.rarity_census(samples, seed)?;
            print_json(&census, cli.pretty)
        }
        Command::Environments => print_json(&engine.catalog().environment_names(), cli.pretty),
    }
}
