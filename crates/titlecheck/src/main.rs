//! titlecheck - Validate pull request titles
//!
//! titlecheck checks a title against the `type(scope)!: subject` convention,
//! resolving `<Display Name> Node` scopes against the display names declared
//! in the TypeScript node sources of the checkout.

mod config;
mod nodes;
mod output;

use clap::{Parser, Subcommand};
use config::{Config, DEFAULT_CONFIG_PATH};
use eyre::{Result, WrapErr};
use nodes::BoundedWalk;
use output::{OutputFormat, render_names, render_report};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use titlecheck_core::Validator;
use tracing_subscriber::EnvFilter;

/// Exit status when the title has issues
const EXIT_ISSUES: u8 = 1;

/// Exit status for configuration errors; clap uses the same for usage errors
const EXIT_CONFIG: u8 = 2;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "titlecheck", version, about = "Validate pull request titles")]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Title to validate, e.g. "feat(core): add x"
    #[arg(required = true)]
    title: Option<String>,

    /// Path to config file (default: .config/titlecheck/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project root (default: nearest ancestor with .git or package.json)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Seconds allowed for collecting node display names
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Subcommands
#[derive(Debug, Subcommand)]
enum Command {
    /// Print the node display names found under the nodes root
    Names,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:?}", "error:".red().bold(), e);
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let project_root = match &args.root {
        Some(root) => root.clone(),
        None => find_project_root()?,
    };

    let config = match &args.config {
        Some(path) => Config::load(path, true)?,
        None => Config::load(&project_root.join(DEFAULT_CONFIG_PATH), false)?,
    };

    let format = match &args.format {
        Some(f) => OutputFormat::from_str(f)
            .ok_or_else(|| eyre::eyre!("Unknown output format '{f}' (expected text or json)"))?,
        None => OutputFormat::default(),
    };

    let nodes = BoundedWalk::new(
        config.to_walk_sources(&project_root),
        args.timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.timeout()),
    );

    match (args.command, args.title) {
        (Some(Command::Names), _) => run_names_command(nodes, &project_root, format),
        (None, Some(title)) => run_validate_command(&title, &config, nodes, format),
        (None, None) => eyre::bail!("No title specified. Usage: titlecheck <TITLE>"),
    }
}

fn run_validate_command(
    title: &str,
    config: &Config,
    nodes: BoundedWalk,
    format: OutputFormat,
) -> Result<ExitCode> {
    let policy = config.to_policy().wrap_err("Invalid title policy")?;
    let validator = Validator::new(policy, nodes);
    let issues = validator.validate(title);

    print!("{}", render_report(title, &issues, format));

    if issues.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_ISSUES))
    }
}

fn run_names_command(
    nodes: BoundedWalk,
    project_root: &Path,
    format: OutputFormat,
) -> Result<ExitCode> {
    eprintln!(
        "{} Scanning node sources in {}...",
        "->".blue().bold(),
        project_root.display()
    );

    let harvest = nodes.harvest()?;

    eprintln!(
        "   Found {} display names in {} files",
        harvest.vocabulary.len().to_string().green(),
        harvest.files_scanned
    );

    if !harvest.warnings.is_empty() {
        eprintln!(
            "{} {} files could not be read:",
            "!".yellow().bold(),
            harvest.warnings.len()
        );
        for warning in &harvest.warnings {
            eprintln!("   {}", warning);
        }
    }

    print!("{}", render_names(&harvest.vocabulary, format));
    Ok(ExitCode::SUCCESS)
}

fn find_project_root() -> Result<PathBuf> {
    let start = std::env::current_dir().wrap_err("Failed to get current directory")?;
    let mut current = start.clone();

    loop {
        if current.join(".git").exists() || current.join("package.json").exists() {
            return Ok(current);
        }

        if !current.pop() {
            // No marker found, use current directory
            return Ok(start);
        }
    }
}
