//! Workspace layout and sync configuration

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};

/// Directory holding the checked-in templates, relative to the workspace root
const TOOLS_DIR: [&str; 2] = [".vscode", "tools"];

const SETTINGS_TEMPLATE: &str = "settings.template.json";
const LAUNCH_TEMPLATE: &str = "launch.template.json";
const WORKSPACE_CONFIG: &str = "editor-sync.toml";

/// Largest accepted `indent`
pub const MAX_INDENT: usize = 16;

/// Settings that shape the generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Upstream checkout (usually a symlink) inside the workspace root
    pub upstream_dir: String,
    /// Settings key holding the analyzer search paths
    pub key: String,
    /// Editor variable naming the workspace root
    pub workspace_var: String,
    /// Spaces per indent level in the rendered list
    pub indent: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            upstream_dir: "_isaac_sim".to_string(),
            key: "python.analysis.extraPaths".to_string(),
            workspace_var: "${workspaceFolder}".to_string(),
            indent: 4,
        }
    }
}

/// One config file; unset keys fall through to the layer below
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    upstream_dir: Option<String>,
    key: Option<String>,
    workspace_var: Option<String>,
    indent: Option<usize>,
}

impl SyncConfig {
    /// Load defaults, then the global config, then the workspace config
    pub fn load(root: &Path) -> Result<Self> {
        let mut files = Vec::new();
        if let Some(global) = global_config_path() {
            files.push(global);
        }
        files.push(tools_dir(root).join(WORKSPACE_CONFIG));
        Self::load_from(&files)
    }

    /// Apply config files in order; later files win, missing files are skipped
    pub fn load_from(files: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();

        for path in files {
            if !path.exists() {
                continue;
            }

            let content = fs::read_to_string(path).map_err(|source| SyncError::Read {
                path: path.clone(),
                source,
            })?;
            let layer: PartialConfig =
                toml::from_str(&content).map_err(|source| SyncError::Config {
                    path: path.clone(),
                    source,
                })?;

            if let Some(indent) = layer.indent.filter(|indent| *indent > MAX_INDENT) {
                return Err(SyncError::InvalidConfig {
                    path: path.clone(),
                    message: format!("indent must be at most {}, got {}", MAX_INDENT, indent),
                });
            }

            log::debug!("Loaded config layer: {}", path.display());
            config.apply(layer);
        }

        Ok(config)
    }

    fn apply(&mut self, layer: PartialConfig) {
        if let Some(upstream_dir) = layer.upstream_dir {
            self.upstream_dir = upstream_dir;
        }
        if let Some(key) = layer.key {
            self.key = key;
        }
        if let Some(workspace_var) = layer.workspace_var {
            self.workspace_var = workspace_var;
        }
        if let Some(indent) = layer.indent {
            self.indent = indent;
        }
    }

    /// Prefix that makes upstream-relative paths workspace-relative
    pub fn base_prefix(&self) -> String {
        format!(
            "{}/{}/",
            self.workspace_var.trim_end_matches('/'),
            self.upstream_dir.trim_matches('/')
        )
    }
}

/// Get the global config file
/// - Linux: ~/.config/editor-sync/config.toml
/// - macOS: ~/Library/Application Support/editor-sync/config.toml
/// - Windows: %APPDATA%/editor-sync/config.toml
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("editor-sync").join("config.toml"))
}

fn tools_dir(root: &Path) -> PathBuf {
    TOOLS_DIR.iter().fold(root.to_path_buf(), |dir, part| dir.join(part))
}

/// Every file the sync reads or writes
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    /// Settings of the upstream checkout, source of the path list
    pub source_settings: PathBuf,
    pub settings_template: PathBuf,
    pub launch_template: PathBuf,
    /// Always regenerated
    pub settings: PathBuf,
    /// Created once, then left to the developer
    pub launch: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, config: &SyncConfig) -> Self {
        let tools = tools_dir(root);
        let vscode = root.join(".vscode");

        Self {
            root: root.to_path_buf(),
            source_settings: root
                .join(config.upstream_dir.trim_matches('/'))
                .join(".vscode")
                .join("settings.json"),
            settings_template: tools.join(SETTINGS_TEMPLATE),
            launch_template: tools.join(LAUNCH_TEMPLATE),
            settings: vscode.join("settings.json"),
            launch: vscode.join("launch.json"),
        }
    }
}

/// Workspace root for a run
///
/// A root named explicitly is used as given, even without templates; those
/// are reported missing when read. Otherwise the root is discovered from `cwd`.
pub fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match explicit {
        Some(root) => Ok(root.to_path_buf()),
        None => discover_root(cwd),
    }
}

/// Find the workspace root for `start`
///
/// The root is the directory containing `.vscode/tools/settings.template.json`.
/// Started from inside `<root>/.vscode/tools`, that is two levels up; otherwise
/// the nearest ancestor holding the template wins.
pub fn discover_root(start: &Path) -> Result<PathBuf> {
    if start.ends_with(TOOLS_DIR.iter().collect::<PathBuf>()) {
        if let Some(root) = start.parent().and_then(Path::parent) {
            log::debug!("Started inside tools directory, root: {}", root.display());
            return Ok(root.to_path_buf());
        }
    }

    start
        .ancestors()
        .find(|dir| tools_dir(dir).join(SETTINGS_TEMPLATE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| SyncError::FileNotFound {
            what: "settings template",
            path: tools_dir(start).join(SETTINGS_TEMPLATE),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        let tools = tools_dir(dir.path());
        fs::create_dir_all(&tools).unwrap();
        fs::write(tools.join(SETTINGS_TEMPLATE), "{}").unwrap();
        dir
    }

    #[test]
    fn test_paths_exist() {
        // Should not panic
        let _ = global_config_path();
    }

    #[test]
    fn test_default_base_prefix() {
        assert_eq!(
            SyncConfig::default().base_prefix(),
            "${workspaceFolder}/_isaac_sim/"
        );
    }

    #[test]
    fn test_base_prefix_normalizes_slashes() {
        let config = SyncConfig {
            upstream_dir: "/deps/sim/".to_string(),
            workspace_var: "${workspaceFolder}/".to_string(),
            ..SyncConfig::default()
        };
        assert_eq!(config.base_prefix(), "${workspaceFolder}/deps/sim/");
    }

    #[test]
    fn test_layout() {
        let layout = Layout::new(Path::new("/repo"), &SyncConfig::default());
        assert_eq!(
            layout.source_settings,
            PathBuf::from("/repo/_isaac_sim/.vscode/settings.json")
        );
        assert_eq!(
            layout.settings_template,
            PathBuf::from("/repo/.vscode/tools/settings.template.json")
        );
        assert_eq!(
            layout.launch_template,
            PathBuf::from("/repo/.vscode/tools/launch.template.json")
        );
        assert_eq!(layout.settings, PathBuf::from("/repo/.vscode/settings.json"));
        assert_eq!(layout.launch, PathBuf::from("/repo/.vscode/launch.json"));
    }

    #[test]
    fn test_layout_keeps_upstream_inside_root() {
        let config = SyncConfig {
            upstream_dir: "/deps/sim/".to_string(),
            ..SyncConfig::default()
        };
        let layout = Layout::new(Path::new("/repo"), &config);
        assert_eq!(
            layout.source_settings,
            PathBuf::from("/repo/deps/sim/.vscode/settings.json")
        );
        assert_eq!(config.base_prefix(), "${workspaceFolder}/deps/sim/");
    }

    #[test]
    fn test_resolve_root_explicit_skips_discovery() {
        let workspace = make_workspace();
        let sub = workspace.path().join("sub");
        fs::create_dir_all(&sub).unwrap();

        let root = resolve_root(Some(&sub), workspace.path()).unwrap();
        assert_eq!(root, sub);
    }

    #[test]
    fn test_resolve_root_discovers_without_explicit() {
        let workspace = make_workspace();
        let sub = workspace.path().join("sub");
        fs::create_dir_all(&sub).unwrap();

        let root = resolve_root(None, &sub).unwrap();
        assert_eq!(root, workspace.path());
    }

    #[test]
    fn test_discover_root_from_tools_dir() {
        let workspace = make_workspace();
        let root = discover_root(&tools_dir(workspace.path())).unwrap();
        assert_eq!(root, workspace.path());
    }

    #[test]
    fn test_discover_root_from_nested_dir() {
        let workspace = make_workspace();
        let nested = workspace.path().join("source").join("extensions");
        fs::create_dir_all(&nested).unwrap();

        let root = discover_root(&nested).unwrap();
        assert_eq!(root, workspace.path());
    }

    #[test]
    fn test_discover_root_without_template() {
        let dir = TempDir::new().unwrap();
        let err = discover_root(dir.path()).unwrap_err();
        assert!(matches!(err, SyncError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_from_layers() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        let workspace = dir.path().join("workspace.toml");
        fs::write(&global, "upstream_dir = \"_sim\"\nindent = 2\n").unwrap();
        fs::write(&workspace, "indent = 8\n").unwrap();

        let config = SyncConfig::load_from(&[global, workspace]).unwrap();
        assert_eq!(config.upstream_dir, "_sim");
        assert_eq!(config.indent, 8);
        assert_eq!(config.key, "python.analysis.extraPaths");
    }

    #[test]
    fn test_load_from_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let config = SyncConfig::load_from(&[dir.path().join("absent.toml")]).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_load_from_rejects_huge_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "indent = 1099511627776\n").unwrap();

        let err = SyncConfig::load_from(&[path]).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_from_accepts_max_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, format!("indent = {}\n", MAX_INDENT)).unwrap();

        let config = SyncConfig::load_from(&[path]).unwrap();
        assert_eq!(config.indent, MAX_INDENT);
    }

    #[test]
    fn test_load_from_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "upstream = \"_sim\"\n").unwrap();

        let err = SyncConfig::load_from(&[path]).unwrap_err();
        assert!(matches!(err, SyncError::Config { .. }));
    }
}
