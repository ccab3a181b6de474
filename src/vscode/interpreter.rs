//! Default interpreter override
//!
//! The settings template ships with `python.defaultInterpreterPath` pointing at
//! the simulator's bundled python. When the developer works from a conda
//! environment, that environment's interpreter is used instead.

use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};

use crate::error::Result;

const INTERPRETER_KEY: &str = "python.defaultInterpreterPath";

/// Whether an interpreter path belongs to a conda installation
pub fn is_conda_interpreter(interpreter: &Path) -> bool {
    interpreter.to_string_lossy().contains("conda")
}

/// Interpreter of the active conda environment, from `CONDA_PREFIX`
pub fn conda_interpreter() -> Option<PathBuf> {
    let prefix = std::env::var_os("CONDA_PREFIX").filter(|p| !p.is_empty())?;
    Some(interpreter_in_prefix(Path::new(&prefix)))
}

fn interpreter_in_prefix(prefix: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        prefix.join("python.exe")
    }

    #[cfg(not(windows))]
    {
        prefix.join("bin").join("python")
    }
}

/// Point `python.defaultInterpreterPath` at `interpreter`
///
/// Interpreters outside a conda installation leave the settings unchanged.
/// The path is JSON-escaped before insertion.
pub fn overwrite_default_interpreter(settings: &str, interpreter: &Path) -> Result<String> {
    if !is_conda_interpreter(interpreter) {
        log::info!(
            "Keeping template interpreter; {} is not a conda interpreter",
            interpreter.display()
        );
        return Ok(settings.to_string());
    }

    let pattern = Regex::new(&format!(
        r#""{}"\s*:\s*"(?:[^"\\]|\\.)*""#,
        regex::escape(INTERPRETER_KEY)
    ))?;
    let value = serde_json::to_string(&interpreter.to_string_lossy())?;
    let replacement = format!("\"{}\": {}", INTERPRETER_KEY, value);

    Ok(pattern
        .replace_all(settings, NoExpand(&replacement))
        .into_owned())
}
