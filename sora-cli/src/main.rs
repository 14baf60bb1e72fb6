//! Sora CLI - SORA 2.5 risk classification and compliance checks

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering (sites print in argument order)
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use sora_core::config::{self, ResolvedConfig};
use sora_core::model::{OsoLevel, Robustness, Sail};
use sora_core::report::render_json_batch;
use sora_core::tables::load_tables_file;
use sora_core::{render_json, render_text, AssessmentInput, AssessmentResult, ReportFormat};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Exit code when `--fail-on-noncompliant` trips
const EXIT_NONCOMPLIANT: i32 = 2;

#[derive(Parser)]
#[command(name = "sora")]
#[command(about = "SORA 2.5 risk assessment: GRC, ARC, SAIL, containment and OSO compliance")]
#[command(version = env!("SORA_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one or more assessment input files (one per site)
    Evaluate {
        /// Assessment input JSON files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format (overrides config file)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exit with status 2 if any site is not compliant
        #[arg(long)]
        fail_on_noncompliant: bool,
    },
    /// Print a default assessment input to start from
    Template,
    /// List OSO requirements for a SAIL
    Oso {
        /// SAIL level (I..VI or 1..6)
        #[arg(long)]
        sail: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Inspect reference table sets
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
    /// Validate or show a configuration file
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum TablesAction {
    /// Print a table set as JSON (default: built-in SORA 2.5)
    Show {
        /// Path to a table set JSON file
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Check a table set for structural errors
    Validate {
        /// Path to a table set JSON file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without evaluating anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            inputs,
            format,
            config: config_path,
            fail_on_noncompliant,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let engine = resolved.engine()?;
            let format = format
                .map(ReportFormat::from)
                .or(resolved.format)
                .unwrap_or(ReportFormat::Text);

            // Sites are independent; collect keeps argument order
            let results = inputs
                .par_iter()
                .map(|path| load_input(path).map(|input| engine.evaluate(&input)))
                .collect::<anyhow::Result<Vec<AssessmentResult>>>()?;

            for (path, result) in inputs.iter().zip(&results) {
                for warning in &result.warnings {
                    tracing::warn!(site = %path.display(), "{}", warning.message());
                }
            }

            match format {
                ReportFormat::Json => {
                    if let [single] = results.as_slice() {
                        println!("{}", render_json(single));
                    } else {
                        println!("{}", render_json_batch(&results));
                    }
                }
                ReportFormat::Text => {
                    for (i, (path, result)) in inputs.iter().zip(&results).enumerate() {
                        if results.len() > 1 {
                            if i > 0 {
                                println!();
                            }
                            println!("== {} ==", path.display());
                        }
                        print!("{}", render_text(result));
                    }
                }
            }

            if fail_on_noncompliant && results.iter().any(|r| !r.is_compliant()) {
                std::process::exit(EXIT_NONCOMPLIANT);
            }
        }
        Commands::Template => {
            let template = serde_json::to_string_pretty(&AssessmentInput::default())
                .context("failed to serialize template")?;
            println!("{}", template);
        }
        Commands::Oso {
            sail,
            format,
            config: config_path,
        } => {
            let level = Sail::parse(&sail)
                .with_context(|| format!("unknown SAIL '{}' (expected I..VI)", sail))?;
            let resolved = load_config(config_path.as_deref())?;

            match format {
                OutputFormat::Text => {
                    println!(
                        "OSO requirements at SAIL {} ({})",
                        level, resolved.tables.revision
                    );
                    println!();
                    println!(
                        "{:<8} {:<4} {:<22} {:<22} NAME",
                        "OSO", "REQ", "CATEGORY", "RESPONSIBLE"
                    );
                    for oso in &resolved.tables.oso {
                        let required = oso.required_for(level);
                        println!(
                            "{:<8} {:<4} {:<22} {:<22} {}",
                            oso.id(),
                            required.as_str(),
                            oso.category.as_str(),
                            oso.responsible.as_str(),
                            oso.name
                        );
                        if let Some(guidance) = oso.guidance_for(required_robustness(required)) {
                            println!("{:<14}evidence: {}", "", guidance);
                        }
                    }
                }
                OutputFormat::Json => {
                    let entries: Vec<serde_json::Value> = resolved
                        .tables
                        .oso
                        .iter()
                        .map(|oso| {
                            let required = oso.required_for(level);
                            serde_json::json!({
                                "id": oso.id(),
                                "name": oso.name,
                                "category": oso.category,
                                "responsible": oso.responsible,
                                "required": required,
                                "guidance": oso.guidance_for(required_robustness(required)),
                            })
                        })
                        .collect();
                    let output = serde_json::to_string_pretty(&serde_json::json!({
                        "revision": resolved.tables.revision,
                        "sail": level,
                        "oso": entries,
                    }))
                    .context("failed to serialize OSO listing")?;
                    println!("{}", output);
                }
            }
        }
        Commands::Tables { action } => match action {
            TablesAction::Show { path } => {
                let tables = match path {
                    Some(p) => load_tables_file(&p)?,
                    None => sora_core::ReferenceTables::sora_2_5(),
                };
                println!("{}", tables.to_json()?);
            }
            TablesAction::Validate { path } => {
                let loaded = match path {
                    Some(ref p) => load_tables_file(p),
                    None => Ok(sora_core::ReferenceTables::sora_2_5()),
                };
                match loaded.and_then(|t| t.validate().map(|_| t).map_err(Into::into)) {
                    Ok(tables) => {
                        println!(
                            "Tables valid: {} ({} OSOs)",
                            tables.revision,
                            tables.oso.len()
                        );
                    }
                    Err(e) => {
                        eprintln!("Table validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;
                print_config(&resolved);
            }
        },
    }

    Ok(())
}

/// Log to stderr, filtered by `SORA_LOG` (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("SORA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&project_root, config_path)
        .context("failed to load configuration")?;
    if let Some(p) = &resolved.config_path {
        eprintln!("Using config: {}", p.display());
    }
    Ok(resolved)
}

fn load_input(path: &Path) -> anyhow::Result<AssessmentInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse input: {}", path.display()))
}

/// Robustness tier whose evidence guidance satisfies a requirement
fn required_robustness(level: OsoLevel) -> Robustness {
    match level {
        OsoLevel::Optional => Robustness::None,
        OsoLevel::Low => Robustness::Low,
        OsoLevel::Medium => Robustness::Medium,
        OsoLevel::High => Robustness::High,
    }
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Tables:");
    println!("  revision: {}", resolved.tables.revision);
    println!(
        "  path: {}",
        resolved
            .tables_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    println!();
    println!("Adjacent area:");
    println!(
        "  flight_seconds: {}",
        resolved.adjacent_area.flight_seconds
    );
    println!(
        "  min_distance_m: {}",
        resolved.adjacent_area.min_distance_m
    );
    println!(
        "  max_distance_m: {}",
        resolved.adjacent_area.max_distance_m
    );
    println!();
    println!(
        "Format: {}",
        match resolved.format {
            Some(ReportFormat::Json) => "json",
            Some(ReportFormat::Text) | None => "text",
        }
    );
}
