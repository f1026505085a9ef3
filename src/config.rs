use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = ".upgraderc.toml";

/// Per-project settings from `.upgraderc.toml`. Every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UpgradeConfig {
    /// Directories skipped while walking, on top of the built-in list.
    pub skip_dirs: Vec<String>,
    /// Rule ids removed from the catalog before the run.
    pub exclude_rules: Vec<String>,
    /// Default report format (`json`, `text`, `md`, `tsv`).
    pub format: Option<String>,
}

impl UpgradeConfig {
    /// Loads `.upgraderc.toml` from `path`. `None` when the file is missing or
    /// cannot be parsed, so callers fall back to defaults.
    pub fn load(path: &Path) -> Option<Self> {
        let config_path = path.join(CONFIG_FILE);
        let content = fs::read_to_string(&config_path).ok()?;

        match toml::from_str::<UpgradeConfig>(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                debug!(path = %config_path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Nearest ancestor of `start` (inclusive) holding a `package.json`.
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join("package.json").is_file())
            .map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(UpgradeConfig::load(tmp.path()).is_none());
        assert_eq!(UpgradeConfig::load_or_default(tmp.path()), UpgradeConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "exclude_rules = [\"FN023002\"]\n").unwrap();

        let config = UpgradeConfig::load(tmp.path()).unwrap();
        assert_eq!(config.exclude_rules, vec!["FN023002"]);
        assert!(config.skip_dirs.is_empty());
        assert!(config.format.is_none());
    }

    #[test]
    fn test_malformed_config_is_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "skip_dirs = \"not a list\"").unwrap();
        assert!(UpgradeConfig::load(tmp.path()).is_none());
    }

    #[test]
    fn test_full_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "skip_dirs = [\"storybook-static\"]\nexclude_rules = []\nformat = \"md\"\n",
        )
        .unwrap();
        let config = UpgradeConfig::load(tmp.path()).unwrap();
        assert_eq!(config.skip_dirs, vec!["storybook-static"]);
        assert_eq!(config.format.as_deref(), Some("md"));
    }

    #[test]
    fn test_find_project_root_walks_up() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("package.json"), "{}").unwrap();
        let nested = tmp.path().join("src/webparts/hello");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(UpgradeConfig::find_project_root(&nested).as_deref(), Some(tmp.path()));
    }
}
