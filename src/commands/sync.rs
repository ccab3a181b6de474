//! Sync command - Regenerate .vscode/settings.json from the upstream checkout
//!
//! - settings.json is rebuilt from its template on every run
//! - launch.json is created from its template once and never touched again
//!
//! Every input is read before the first write, so a run that fails on a
//! missing file leaves the outputs as they were.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::utils;
use crate::config::{Layout, SyncConfig};
use crate::vscode::{extra_paths, header, interpreter, ExtraPaths};

/// Options for a sync run
#[derive(Debug, Default)]
pub struct SyncOptions {
    /// Compute everything, write nothing
    pub dry_run: bool,
    /// Interpreter to set as the default, if any
    pub interpreter: Option<PathBuf>,
}

/// What happened to one output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Written,
    Created,
    /// Existed already; left alone
    Kept,
    WouldWrite,
    WouldCreate,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Summary of a sync run
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub root: PathBuf,
    pub key: String,
    pub extra_paths: Vec<String>,
    pub settings: FileReport,
    pub launch: FileReport,
}

/// The regenerated settings document, header included
pub struct RenderedSettings {
    pub extra_paths: ExtraPaths,
    pub content: String,
}

/// Build settings.json content from the upstream settings and the template
pub fn render_settings(
    layout: &Layout,
    config: &SyncConfig,
    interpreter: Option<&Path>,
) -> Result<RenderedSettings> {
    let template = utils::read_required(&layout.settings_template, "settings template")?;
    let source = utils::read_required(&layout.source_settings, "upstream settings file")?;

    let extra_paths = extra_paths::extract_extra_paths(&source, &config.key, &config.base_prefix())
        .with_context(|| format!("Failed to read paths from: {}", layout.source_settings.display()))?;

    let mut settings = extra_paths::merge_extra_paths(&template, &extra_paths, config.indent)?;
    if let Some(interpreter) = interpreter {
        settings = interpreter::overwrite_default_interpreter(&settings, interpreter)?;
    }

    Ok(RenderedSettings {
        extra_paths,
        content: header::with_header(&layout.settings_template, &settings),
    })
}

/// Execute the sync command
pub fn execute(layout: &Layout, config: &SyncConfig, options: &SyncOptions) -> Result<SyncReport> {
    let rendered = render_settings(layout, config, options.interpreter.as_deref())?;

    let launch = if layout.launch.exists() {
        log::info!("Keeping existing {}", layout.launch.display());
        None
    } else {
        let template = utils::read_required(&layout.launch_template, "launch template")?;
        Some(header::with_header(&layout.launch_template, &template))
    };

    // All inputs read; nothing below can fail on a missing file
    let settings_outcome = if options.dry_run {
        Outcome::WouldWrite
    } else {
        utils::write_output(&layout.settings, &rendered.content)?;
        Outcome::Written
    };

    let launch_outcome = match launch {
        None => Outcome::Kept,
        Some(_) if options.dry_run => Outcome::WouldCreate,
        Some(content) => {
            utils::write_output(&layout.launch, &content)?;
            Outcome::Created
        }
    };

    Ok(SyncReport {
        root: layout.root.clone(),
        key: rendered.extra_paths.key().to_string(),
        extra_paths: rendered.extra_paths.entries().to_vec(),
        settings: FileReport {
            path: layout.settings.clone(),
            outcome: settings_outcome,
        },
        launch: FileReport {
            path: layout.launch.clone(),
            outcome: launch_outcome,
        },
    })
}

/// Print a human-readable summary of a sync run
pub fn print_summary(report: &SyncReport) {
    println!("Workspace: {}", report.root.display());
    println!(
        "Merged {} entries into \"{}\":",
        report.extra_paths.len(),
        report.key
    );
    for path in &report.extra_paths {
        println!("  {}", path);
    }
    println!();

    for file in [&report.settings, &report.launch] {
        match file.outcome {
            Outcome::Written => println!("{} {}", "Wrote:".green(), file.path.display()),
            Outcome::Created => println!("{} {}", "Created:".green(), file.path.display()),
            Outcome::Kept => println!(
                "{} {} (already exists)",
                "Skipped:".yellow(),
                file.path.display()
            ),
            Outcome::WouldWrite => println!("{} {}", "Would write:".blue(), file.path.display()),
            Outcome::WouldCreate => {
                println!("{} {}", "Would create:".blue(), file.path.display())
            }
        }
    }
}
