//! axcheck
//!
//! Scans a captured accessibility tree snapshot against the standard rule set.

use anyhow::{Context, Result};
use axcheck_core::{ElementTree, RuleId, ScanStatus};
use axcheck_engine::{EngineConfig, Scanner};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

mod config;
mod report;

#[derive(Parser, Debug)]
#[command(name = "axcheck")]
#[command(about = "Accessibility rule scanner for UI element trees", long_about = None)]
struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true, env = "AXCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a tree snapshot
    Scan(ScanArgs),

    /// List the standard rules
    Rules {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Snapshot file describing the element tree (JSON)
    pub snapshot: PathBuf,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Containment margin for bounding rectangle checks
    #[arg(long)]
    pub margin: Option<i32>,

    /// Maximum number of nodes to visit
    #[arg(long)]
    pub max_nodes: Option<usize>,

    /// Evaluate nodes on the calling thread only
    #[arg(long)]
    pub sequential: bool,

    /// Rule to skip; may be repeated
    #[arg(long = "disable", value_name = "RULE")]
    pub disable: Vec<RuleId>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan(args) => scan(cli.config.as_deref(), &args),
        Command::Rules { format } => {
            let config = match cli.config.as_deref() {
                Some(path) => EngineConfig::from_file(path)
                    .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
                None => EngineConfig::default(),
            };
            let registry = axcheck_rules::standard_registry(config)?;

            let mut out = io::stdout().lock();
            match format {
                OutputFormat::Text => report::write_rules_text(&registry, &mut out)?,
                OutputFormat::Json => report::write_rules_json(&registry, &mut out)?,
            }
            out.flush()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn scan(config_path: Option<&std::path::Path>, args: &ScanArgs) -> Result<ExitCode> {
    let config = config::load(config_path, args)?;

    let tree = ElementTree::from_file(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;
    info!(snapshot = %args.snapshot.display(), "Snapshot loaded");

    let registry = axcheck_rules::standard_registry(config)?;
    let scanner = Scanner::new(Arc::new(registry));
    let results = scanner.scan(&tree.root());

    let mut out = io::stdout().lock();
    match args.format {
        OutputFormat::Text => report::write_scan_text(&results, &mut out)?,
        OutputFormat::Json => report::write_scan_json(&results, &mut out)?,
    }
    out.flush()?;

    Ok(match results.status().status() {
        ScanStatus::Fail => ExitCode::from(1),
        _ => ExitCode::SUCCESS,
    })
}

/// Logs go to stderr so report output on stdout stays machine readable
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("axcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("axcheck=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
