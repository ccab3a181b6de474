//! editor-sync: regenerate VS Code settings from an upstream simulator checkout
//!
//! Run with no arguments from anywhere inside the workspace.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

mod commands;
mod config;
mod error;
mod vscode;

use commands::check::CheckStatus;

#[derive(Parser)]
#[command(name = "editor-sync")]
#[command(about = "Regenerate VS Code settings from the upstream simulator settings", long_about = None)]
#[command(version)]
struct Cli {
    /// Workspace root (discovered from the current directory if omitted)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Print a JSON report instead of the summary
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Default)]
struct RenderArgs {
    /// Point python.defaultInterpreterPath at the active conda environment
    #[arg(long)]
    conda_interpreter: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate settings.json and create launch.json if missing (default)
    Sync {
        /// Show what would be done without making changes
        #[arg(short = 'n', long)]
        dry_run: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Exit non-zero if settings.json is missing or out of date
    Check {
        #[command(flatten)]
        render: RenderArgs,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn canonical(path: &Path) -> Result<PathBuf> {
    let resolved = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    Ok(commands::utils::strip_windows_prefix(&resolved))
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let explicit = root.as_deref().map(canonical).transpose()?;
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    let root = config::resolve_root(explicit.as_deref(), &canonical(&cwd)?)?;
    log::info!("Workspace root: {}", root.display());
    Ok(root)
}

fn resolve_interpreter(render: &RenderArgs) -> Option<PathBuf> {
    if !render.conda_interpreter {
        return None;
    }
    let interpreter = vscode::interpreter::conda_interpreter();
    if interpreter.is_none() {
        log::warn!("CONDA_PREFIX is not set; keeping the template interpreter");
    }
    interpreter
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = resolve_root(cli.root)?;
    let sync_config = config::SyncConfig::load(&root)?;
    let layout = config::Layout::new(&root, &sync_config);

    let command = cli.command.unwrap_or(Commands::Sync {
        dry_run: false,
        render: RenderArgs::default(),
    });

    match command {
        Commands::Sync { dry_run, render } => {
            if dry_run && !cli.json {
                println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }
            let options = commands::sync::SyncOptions {
                dry_run,
                interpreter: resolve_interpreter(&render),
            };
            let report = commands::sync::execute(&layout, &sync_config, &options)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                commands::sync::print_summary(&report);
            }
        }

        Commands::Check { render } => {
            let interpreter = resolve_interpreter(&render);
            let report =
                commands::check::execute(&layout, &sync_config, interpreter.as_deref())?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                commands::check::print_summary(&report);
            }

            if report.status != CheckStatus::UpToDate {
                bail!(
                    "{} needs regenerating; run `editor-sync sync`",
                    report.path.display()
                );
            }
        }
    }

    Ok(())
}
