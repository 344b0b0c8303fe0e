use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;

use pantry_allocation::{DistributionEngine, ParameterGenerator};
use pantry_inventory::{Category, SampleSet};

mod input;
mod settings;

use input::PlanInput;

#[derive(Parser, Debug)]
#[command(name = "pantry-plan")]
#[command(about = "Recommend how much perishable stock to distribute")]
#[command(version)]
struct Args {
    /// JSON file with `items` and optional `history`
    #[arg(short, long, conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Built-in sample inventory (high, medium, low)
    #[arg(short, long)]
    sample: Option<SampleSet>,

    /// Reference instant (RFC 3339); defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Engine configuration file (TOML)
    #[arg(short, long, env = "PANTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Generate pickup counts for categories without observations
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    pantry_observability::init();

    let args = Args::parse();
    let now = args.now.unwrap_or_else(Utc::now);

    let config = settings::load(args.config.as_deref())?;
    let engine = DistributionEngine::new(config).context("invalid engine configuration")?;

    let input = match (&args.input, args.sample) {
        (Some(path), _) => PlanInput::load(path)?,
        (None, Some(set)) => PlanInput::sample(set, now)?,
        (None, None) => {
            tracing::warn!("no --input or --sample given; using the low-confidence sample");
            PlanInput::sample(SampleSet::LowConfidence, now)?
        }
    };
    let (items, mut history) = input.into_parts();

    if let Some(seed) = args.seed {
        let categories: Vec<Category> = items.iter().map(|i| i.category().clone()).collect();
        let generated = ParameterGenerator::seeded(seed).fill_missing_pickups(&mut history, &categories);
        tracing::info!(seed, generated = generated.len(), "filled missing pickup counts");
    }

    let output = engine
        .optimize(&items, &history, now)
        .context("optimization failed")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}
