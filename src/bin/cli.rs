//! bikeway-stats CLI - progress report for a set of GeoJSON datasets
//!
//! Usage:
//!   bikeway-stats <FILE>... [--json] [--undefined-percent]
//!
//! Each file is one FeatureCollection. Files are merged in argument order,
//! so when two datasets describe the same segment the earlier file wins.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bikeway_stats::{
    display_distance_in_km, display_optional_percent, get_stats_with_config, FeatureCollection,
    Result, StatsConfig, StatsError, ZeroTotalPolicy,
};
use clap::Parser;
use log::{error, info};

#[derive(Parser)]
#[command(name = "bikeway-stats")]
#[command(about = "Progress statistics for mapped bikeway networks", long_about = None)]
struct Cli {
    /// GeoJSON FeatureCollection files, in priority order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,

    /// Report no percentage (instead of 0%) when nothing is measurable
    #[arg(long)]
    undefined_percent: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let collections = cli
        .files
        .iter()
        .map(|path| load_collection(path))
        .collect::<Result<Vec<_>>>()?;

    let config = StatsConfig {
        zero_total: if cli.undefined_percent {
            ZeroTotalPolicy::Undefined
        } else {
            ZeroTotalPolicy::Zero
        },
        ..StatsConfig::default()
    };
    let stats = get_stats_with_config(&collections, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    for (_, stat) in stats.iter() {
        println!(
            "{:<12} {:>12} ({})",
            stat.label,
            display_distance_in_km(stat.distance as f64),
            display_optional_percent(stat.percent)
        );
    }
    println!(
        "{:<12} {:>12}",
        "Total",
        display_distance_in_km(stats.total_distance() as f64)
    );

    Ok(())
}

fn load_collection(path: &Path) -> Result<FeatureCollection> {
    let text = fs::read_to_string(path).map_err(|e| StatsError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let collection = FeatureCollection::from_json(&text)?;
    info!(
        "Loaded {} features from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}
