//! Collective Disambiguation CLI
//!
//! Runs the disambiguation pipeline over YAML fixture files.
//!
//! # Usage
//!
//! ```bash
//! # Top 3 resolutions per mention
//! collective_cli --candidates candidates.yaml --graph graph.yaml \
//!     --mentions mentions.yaml resolve --k 3
//!
//! # Single best resolution per mention, as JSON
//! collective_cli --candidates candidates.yaml --graph graph.yaml \
//!     --mentions mentions.yaml -o json best
//! ```
//!
//! Configuration comes from `--config`, else `COLLECTIVE_CONFIG`, with the
//! `COLLECTIVE_*` overrides applied on top.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use collective_linker::{
    CollectiveDisambiguator, CollectiveDisambiguatorService, DisambiguatorConfig,
    InMemoryCandidateSearcher, InMemoryKnowledgeGraph, ResultTable, ScoredResolution,
    SurfaceFormOccurrence,
};

#[derive(Parser)]
#[command(name = "collective_cli")]
#[command(version = "0.1.0")]
#[command(about = "Collective graph-based entity disambiguation over fixture files")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disambiguator configuration (YAML)
    #[arg(long, short, global = true, env = "COLLECTIVE_CONFIG")]
    config: Option<PathBuf>,

    /// Candidate index: `surface_forms: { <form>: [ {uri, support, prior} ] }`
    #[arg(long)]
    candidates: PathBuf,

    /// Knowledge graph: `triples: [[subject, predicate, object]]`
    #[arg(long)]
    graph: PathBuf,

    /// Mentions: list of `{surface_form, context, text_offset}` (YAML or JSON)
    #[arg(long, short)]
    mentions: PathBuf,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Up to k scored resolutions per mention
    Resolve {
        #[arg(long, short, default_value_t = 3)]
        k: usize,
    },

    /// Best resolution per mention; unresolved mentions are left out
    Best,
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let service = build_service(cli)?;
    let mentions = load_mentions(&cli.mentions)?;

    match cli.command {
        Commands::Resolve { k } => {
            let table = service
                .resolve(&mentions, k)
                .context("Disambiguation failed")?;
            print_table(&table, cli.format)
        }
        Commands::Best => {
            let best = service
                .resolve_best(&mentions)
                .context("Disambiguation failed")?;
            print_best(&best, cli.format)
        }
    }
}

// =============================================================================
// SETUP
// =============================================================================

fn build_service(cli: &Cli) -> Result<CollectiveDisambiguatorService> {
    let mut config = match &cli.config {
        Some(path) => DisambiguatorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DisambiguatorConfig::default(),
    };
    config
        .apply_overrides(|key| std::env::var(key).ok())
        .context("Invalid environment override")?;

    let searcher = InMemoryCandidateSearcher::load_from_file(&cli.candidates)
        .with_context(|| format!("Failed to load candidates {}", cli.candidates.display()))?;
    let graph = InMemoryKnowledgeGraph::load_from_file(&cli.graph)
        .with_context(|| format!("Failed to load graph {}", cli.graph.display()))?;

    let service =
        CollectiveDisambiguatorService::from_config(&config, Arc::new(searcher), Arc::new(graph))?;
    Ok(service)
}

fn load_mentions(path: &Path) -> Result<Vec<SurfaceFormOccurrence>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mentions {}", path.display()))?;

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let mentions = if is_json {
        serde_json::from_str(&content).context("Invalid mentions JSON")?
    } else {
        serde_yaml::from_str(&content).context("Invalid mentions YAML")?
    };
    Ok(mentions)
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_table(table: &ResultTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table)?);
        }
        OutputFormat::Text => {
            for entry in table.iter() {
                println!("{}", entry.occurrence.to_string().bold());
                if entry.resolutions.is_empty() {
                    println!("  {}", "(unresolved)".dimmed());
                }
                for resolution in &entry.resolutions {
                    println!("  {:.4}  {}", resolution.score, resolution.entity.uri.green());
                }
            }
        }
    }
    Ok(())
}

fn print_best(best: &[ScoredResolution], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(best)?);
        }
        OutputFormat::Text => {
            for resolution in best {
                println!(
                    "{} -> {} ({:.4})",
                    resolution.occurrence.to_string().bold(),
                    resolution.entity.uri.green(),
                    resolution.score
                );
            }
        }
    }
    Ok(())
}
