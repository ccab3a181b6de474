//! Check command - Report whether .vscode/settings.json matches its inputs

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::sync;
use crate::config::{Layout, SyncConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckStatus {
    UpToDate,
    /// Exists but differs from what a sync would write
    Stale,
    Missing,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub path: PathBuf,
    pub status: CheckStatus,
}

/// Execute the check command; never writes
pub fn execute(
    layout: &Layout,
    config: &SyncConfig,
    interpreter: Option<&Path>,
) -> Result<CheckReport> {
    let rendered = sync::render_settings(layout, config, interpreter)?;

    let status = if !layout.settings.exists() {
        CheckStatus::Missing
    } else {
        let current = fs::read_to_string(&layout.settings)
            .with_context(|| format!("Failed to read: {}", layout.settings.display()))?;
        if current == rendered.content {
            CheckStatus::UpToDate
        } else {
            CheckStatus::Stale
        }
    };

    log::info!("{}: {:?}", layout.settings.display(), status);

    Ok(CheckReport {
        path: layout.settings.clone(),
        status,
    })
}

/// Print a human-readable check result
pub fn print_summary(report: &CheckReport) {
    match report.status {
        CheckStatus::UpToDate => println!("{} {}", "Up to date:".green(), report.path.display()),
        CheckStatus::Stale => println!("{} {}", "Out of date:".yellow(), report.path.display()),
        CheckStatus::Missing => println!("{} {}", "Missing:".red(), report.path.display()),
    }
}
