//! editor-sync library
//!
//! Regenerates a workspace's VS Code settings from the settings of an upstream
//! simulator checkout: the analyzer search paths are read from the upstream
//! file, made workspace-relative, and merged into a checked-in template.

pub mod config;
pub mod error;
pub mod vscode;
