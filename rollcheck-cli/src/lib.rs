#![warn(missing_docs)]
//! rollcheck CLI Library
//!
//! Command-line front end: loads a CSV roll log, runs the fairness and
//! charging analyses, and renders the report as text or JSON.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     rollcheck_cli::run()
//! }
//! ```

mod analysis;
mod config;
mod dataset;
mod formatting;

pub use analysis::{BOOTSTRAP_HISTOGRAM_BINS, BOOTSTRAP_STATISTIC, analyze, build_report_meta};
pub use config::*;
pub use dataset::{Roll, RollLog, parse_charged};
pub use formatting::{format_histogram, format_human_output};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rayon::ThreadPoolBuilder;
use rollcheck_report::{OutputFormat, generate_json_report};
use std::io::Write;
use std::path::{Path, PathBuf};

/// rollcheck CLI arguments
#[derive(Parser, Debug)]
#[command(name = "rollcheck")]
#[command(author, version, about = "rollcheck - is this die fair, and does charging it matter?")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Optional subcommand (Analyze, Init); a bare path runs Analyze
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the implicit analyze command
    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a CSV roll log
    Analyze(AnalyzeArgs),
    /// Write a default rollcheck.toml
    Init {
        /// Where to write the file
        #[arg(default_value = "rollcheck.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Options of the analyze command; unset values come from rollcheck.toml
#[derive(Args, Debug, Default, Clone)]
pub struct AnalyzeArgs {
    /// CSV roll log with `roll` and `charged` columns
    #[arg(value_name = "ROLLS.csv")]
    pub rolls: Option<PathBuf>,

    /// Significance level for the hypothesis tests
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Bootstrap iterations
    #[arg(long, short = 'n')]
    pub iterations: Option<usize>,

    /// Confidence level of the bootstrap interval
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Seed for a reproducible bootstrap
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Threads for the bootstrap (0 = all cores)
    #[arg(long, short = 'j', default_value = "0")]
    pub threads: usize,

    /// Run the bootstrap on a single thread
    #[arg(long)]
    pub serial: bool,

    /// Explicit configuration file instead of discovery
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl AnalyzeArgs {
    /// Overlay command-line values on a file configuration
    pub fn apply_to(&self, config: &mut RollcheckConfig) {
        if let Some(alpha) = self.alpha {
            config.analysis.alpha = alpha;
        }
        if let Some(iterations) = self.iterations {
            config.bootstrap.iterations = iterations;
        }
        if let Some(confidence) = self.confidence {
            config.bootstrap.confidence_level = confidence;
        }
        if self.seed.is_some() {
            config.bootstrap.seed = self.seed;
        }
        if self.serial {
            config.bootstrap.parallel = false;
        }
        if let Some(format) = &self.format {
            config.output.format = format.clone();
        }
    }
}

/// Run the rollcheck CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if loading or analysis fails.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the rollcheck CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Analyze(ref args)) => analyze_command(args),
        Some(Commands::Init { ref path, force }) => {
            init_logging(false);
            init_command(path, force)
        }
        None => analyze_command(&cli.analyze),
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_logging(verbose: bool) {
    let filter = if verbose {
        "rollcheck=debug,rollcheck_cli=debug,rollcheck_stats=debug"
    } else {
        "rollcheck=info,rollcheck_cli=info,rollcheck_stats=info"
    };
    // A subscriber may already be installed when embedded or under test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve the effective configuration: file (explicit or discovered), then flags
pub fn resolve_config(args: &AnalyzeArgs) -> anyhow::Result<RollcheckConfig> {
    let mut config = match &args.config {
        Some(path) => RollcheckConfig::load(path)?,
        None => RollcheckConfig::discover()?.unwrap_or_default(),
    };
    args.apply_to(&mut config);
    config.validate().context("Invalid analysis settings")?;
    Ok(config)
}

fn analyze_command(args: &AnalyzeArgs) -> anyhow::Result<()> {
    init_logging(args.verbose);

    let Some(path) = args.rolls.as_ref() else {
        bail!("No roll log given. Usage: rollcheck analyze <ROLLS.csv>");
    };

    let config = resolve_config(args)?;
    let format: OutputFormat = config
        .output
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    // Configure Rayon thread pool for the bootstrap
    if args.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .ok();
    }

    let log = RollLog::from_path(path)?;
    tracing::info!(path = %path.display(), rolls = log.len(), "loaded roll log");

    let source = path.display().to_string();
    let report = analyze(&log, &config, Some(&source))?;

    // Generate output
    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };

    // Write output
    if let Some(ref out) = args.output {
        let mut file = std::fs::File::create(out)
            .with_context(|| format!("Failed to create {}", out.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", out.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

fn init_command(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, RollcheckConfig::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
