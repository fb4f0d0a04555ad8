//! # Waylay Command Line
//!
//! Budgets, generates and estimates encounters from the command line. Every
//! subcommand prints JSON to stdout.

use clap::{Args, Parser, Subcommand};
use log::info;
use serde_json::json;
use std::path::PathBuf;
use waylay::{
    calculate_encounter_probabilities, calculate_encounter_probability_distribution,
    compute_xp_bounds, create_rng, Catalog, Difficulty, DistanceRoller, EncounterContext,
    EncounterGenerator, EncounterRequest, GenerationConfig, Generator, PartyComposition, Road,
    SelectionStrategy, Tables, TimeOfDay, TravelInstance, TravelMedium, TravelPace, WaylayError,
    WaylayResult,
};

/// Command line arguments for Waylay.
#[derive(Parser, Debug)]
#[command(name = "waylay")]
#[command(about = "Balanced combat encounters and travel encounter odds")]
#[command(version)]
struct Cli {
    /// JSON file overriding some or all lookup tables
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the XP window for a party and difficulty
    Bounds {
        /// Party as LEVELxCOUNT entries, e.g. "5x3,4"
        #[arg(long)]
        party: PartyComposition,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
    },
    /// Generate a combat encounter from a creature catalog
    Generate {
        /// JSON array of creatures
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        party: PartyComposition,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        /// auto, simple or leader-follower
        #[arg(long, default_value = "auto")]
        strategy: SelectionStrategy,
        /// Random seed for reproducible generation
        #[arg(short, long)]
        seed: Option<u64>,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Print per-roll encounter odds, and the count distribution over several rolls
    Odds {
        #[command(flatten)]
        context: ContextArgs,
        /// Number of rolls in the journey
        #[arg(long, default_value_t = 1)]
        rolls: u32,
    },
    /// Roll the distance at which an encounter begins
    Distance {
        #[command(flatten)]
        context: ContextArgs,
        /// Random seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// Travel context shared by several subcommands.
#[derive(Args, Debug, Clone)]
struct ContextArgs {
    #[arg(long)]
    biome: Option<String>,
    /// day or night
    #[arg(long)]
    time: Option<TimeOfDay>,
    /// no road, highway, byway, royalway or bridleway
    #[arg(long)]
    road: Option<Road>,
    /// slow, normal or fast
    #[arg(long)]
    pace: Option<TravelPace>,
    /// ground, air or sea
    #[arg(long)]
    medium: Option<TravelMedium>,
}

impl ContextArgs {
    fn to_context(&self) -> EncounterContext {
        EncounterContext {
            biome: self.biome.clone(),
            time_of_day: self.time,
            road: self.road,
            travel_pace: self.pace,
            travel_medium: self.medium,
        }
    }
}

fn main() -> WaylayResult<()> {
    let args = Cli::parse();

    initialize_logging(&args.log_level);
    info!("Starting Waylay v{}", waylay::VERSION);

    let tables = match &args.tables {
        Some(path) => Tables::load(path)?,
        None => Tables::default(),
    };

    let output = match &args.command {
        Command::Bounds { party, difficulty } => run_bounds(&tables, party, *difficulty),
        Command::Generate {
            catalog,
            party,
            difficulty,
            strategy,
            seed,
            context,
        } => {
            let catalog = Catalog::load(catalog)?;
            let request = EncounterRequest::new(party.clone(), *difficulty).with_context(context.to_context());
            let config = GenerationConfig::new(resolve_seed(*seed)).with_strategy(*strategy);
            run_generate(&tables, &catalog, request, &config)?
        }
        Command::Odds { context, rolls } => run_odds(&tables, &context.to_context(), *rolls),
        Command::Distance { context, seed } => {
            run_distance(&tables, &context.to_context(), &GenerationConfig::new(resolve_seed(*seed)))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Initializes `env_logger` at the given level unless `RUST_LOG` is set.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);
    seed
}

fn run_bounds(tables: &Tables, party: &PartyComposition, difficulty: Difficulty) -> serde_json::Value {
    let stats = party.stats();
    let budget = compute_xp_bounds(
        &tables.xp_thresholds,
        stats.average_level,
        stats.party_size,
        difficulty,
    );
    json!({
        "difficulty": difficulty,
        "party": stats,
        "budget": budget,
    })
}

fn run_generate(
    tables: &Tables,
    catalog: &Catalog,
    request: EncounterRequest,
    config: &GenerationConfig,
) -> WaylayResult<serde_json::Value> {
    if catalog.is_empty() {
        return Err(WaylayError::InvalidInput("creature catalog is empty".to_string()));
    }
    let generator = EncounterGenerator::new(catalog, tables, request);
    let encounter = generator.generate(config, &mut create_rng(config))?;
    Ok(json!({
        "seed": config.seed,
        "strategy": config.strategy,
        "encounter": encounter,
    }))
}

fn run_odds(tables: &Tables, context: &EncounterContext, rolls: u32) -> serde_json::Value {
    let per_roll = calculate_encounter_probabilities(tables, context);
    let journey = [TravelInstance::new(context.clone(), rolls)];
    let distribution = calculate_encounter_probability_distribution(&journey, tables);
    json!({
        "per_roll": per_roll,
        "distribution": distribution,
    })
}

fn run_distance(
    tables: &Tables,
    context: &EncounterContext,
    config: &GenerationConfig,
) -> WaylayResult<serde_json::Value> {
    let roller = DistanceRoller::new(&tables.distances, context);
    let feet = roller.generate(config, &mut create_rng(config))?;
    Ok(json!({
        "seed": config.seed,
        "dice": roller.dice().to_string(),
        "feet": feet,
    }))
}
