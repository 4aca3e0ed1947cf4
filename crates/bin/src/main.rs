//! Nashik CLI binary.
//!
//! Ranks a fundamentals snapshot and prints or exports the result.

use clap::{Parser, Subcommand};
use nashik::{Engine, EngineConfig, NseWatchlist, RunError, Universe};
use nashik_data::{CsvSnapshotSource, FundamentalsSource, JsonSnapshotSource};
use nashik_factors::{Edition, factor_explanations};
use nashik_output::{ExportFormat, Exporter, RankingReport, explanation_ascii_table};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nashik")]
#[command(about = "Nashik: multi-factor ranking of listed equities", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the companies in a fundamentals snapshot
    Rank {
        /// Snapshot file (.json or .csv)
        #[arg(long)]
        input: PathBuf,

        /// Output format (text, json, pretty-json or csv)
        #[arg(long, default_value = "text")]
        format: String,

        /// Factor table edition (base or extended); overrides the config file
        #[arg(long)]
        edition: Option<String>,

        /// JSON engine configuration
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the factor explanation table
    Factors {
        /// Factor table edition (base or extended)
        #[arg(long, default_value = "extended")]
        edition: String,
    },

    /// List the watchlist companies
    Universe,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nashik=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            input,
            format,
            edition,
            config,
            output,
        } => {
            let mut engine_config = match config {
                Some(path) => EngineConfig::from_json_file(path)?,
                None => EngineConfig::default(),
            };
            if let Some(edition) = edition {
                engine_config.edition = edition.parse()?;
            }
            rank(&input, &format, engine_config, output.as_deref())?;
        }
        Commands::Factors { edition } => {
            let edition: Edition = edition.parse()?;
            println!("Factor explanations ({} edition)\n", edition);
            print!(
                "{}",
                explanation_ascii_table(&factor_explanations(&edition.factor_table()))
            );
        }
        Commands::Universe => list_universe(),
    }

    Ok(())
}

fn snapshot_source(input: &Path) -> Box<dyn FundamentalsSource> {
    let is_csv = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(CsvSnapshotSource::from_path(input))
    } else {
        Box::new(JsonSnapshotSource::from_path(input))
    }
}

fn rank(
    input: &Path,
    format: &str,
    config: EngineConfig,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Engine::new(config)?;
    let source = snapshot_source(input);

    let run = match engine.run_source(source.as_ref()) {
        Ok(run) => run,
        Err(RunError::NoDataAvailable { inputs, warnings }) => {
            for w in &warnings {
                eprintln!("  {} ({}): {}", w.entity, w.kind, w.message);
            }
            return Err(RunError::NoDataAvailable { inputs, warnings }.into());
        }
        Err(e) => return Err(e.into()),
    };
    let report = run.into_report();

    let content = render(&report, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{}", content),
    }

    Ok(())
}

fn render(report: &RankingReport, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    if format.eq_ignore_ascii_case("text") {
        return Ok(report.to_ascii_table());
    }
    let format: ExportFormat = format.parse()?;
    let mut content = report.export_to_string(format)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    Ok(content)
}

fn list_universe() {
    let watchlist = NseWatchlist::new();

    println!("NSE Watchlist");
    println!("=============\n");
    println!("Total constituents: {}\n", watchlist.size());

    for c in watchlist.constituents() {
        println!("  {:24} {}", c.name, c.symbol);
    }
}
