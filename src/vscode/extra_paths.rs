//! Extraction and substitution of the analyzer search-path list
//!
//! The list lives in a settings document as
//!
//! ```text
//! "python.analysis.extraPaths": [
//!     "exts/omni.isaac.core",
//!     "kit/python/lib"
//! ]
//! ```
//!
//! Documents are JSON with comments, so nothing here parses them. The list is
//! located with a non-greedy pattern that spans lines and is rewritten as text.

use regex::{NoExpand, Regex};

use crate::error::{Result, SyncError};

/// The relocated path list read from a source settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraPaths {
    key: String,
    entries: Vec<String>,
}

impl ExtraPaths {
    /// Settings key the list was read from
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Relocated entries, unquoted, in source order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Render as a `"<key>": [...]` span, one entry per line
    ///
    /// Entries sit two indent levels deep and the closing bracket one level,
    /// matching a top-level key in a settings file. An empty list renders as a
    /// single-line `"<key>": []` instead of a bracket pair around a blank line.
    pub fn render(&self, indent: usize) -> String {
        if self.entries.is_empty() {
            return format!("\"{}\": []", self.key);
        }

        let outer = " ".repeat(indent);
        let inner = " ".repeat(indent * 2);
        let separator = format!(",\n{}", inner);
        let body = self
            .entries
            .iter()
            .map(|entry| format!("\"{}\"", entry))
            .collect::<Vec<_>>()
            .join(separator.as_str());

        format!("\"{}\": [\n{}{}\n{}]", self.key, inner, body, outer)
    }
}

/// Pattern matching a `"<key>": [ ... ]` span, brackets included
///
/// Group 1 is the raw list body. The first `]` closes the span, so entries
/// must not contain brackets.
fn list_pattern(key: &str) -> Result<Regex> {
    let pattern = format!(r#"(?s)"{}"\s*:\s*\[(.*?)\]"#, regex::escape(key));
    Ok(Regex::new(&pattern)?)
}

/// Read the list stored under `key` and prefix every entry with `base`
///
/// Entries are split on `,` and trimmed of whitespace and quotes; empty
/// entries (trailing commas, blank lists) are dropped. Only the first
/// occurrence of the key is considered.
pub fn extract_extra_paths(source: &str, key: &str, base: &str) -> Result<ExtraPaths> {
    let pattern = list_pattern(key)?;
    let body = pattern
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| SyncError::MissingField {
            key: key.to_string(),
        })?
        .as_str();

    let entries = body
        .split(',')
        .map(|entry| entry.trim().trim_matches('"'))
        .filter(|entry| !entry.is_empty())
        .map(|entry| format!("{}{}", base, entry))
        .collect::<Vec<_>>();

    log::debug!("Extracted {} entries for \"{}\"", entries.len(), key);

    Ok(ExtraPaths {
        key: key.to_string(),
        entries,
    })
}

/// Replace every `"<key>": [...]` span in `template` with the rendered list
///
/// Everything outside the matched spans is left byte-identical. The
/// replacement is inserted literally, so `${workspaceFolder}` survives.
pub fn merge_extra_paths(template: &str, paths: &ExtraPaths, indent: usize) -> Result<String> {
    let pattern = list_pattern(&paths.key)?;

    let spans = pattern.find_iter(template).count();
    if spans == 0 {
        log::warn!(
            "Template has no \"{}\" list; leaving it unchanged",
            paths.key
        );
    } else {
        log::debug!("Replacing {} \"{}\" span(s)", spans, paths.key);
    }

    let rendered = paths.render(indent);
    Ok(pattern
        .replace_all(template, NoExpand(&rendered))
        .into_owned())
}
