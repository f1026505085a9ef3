//! Entry point of the analysis core: load the project, resolve the rule list
//! for the requested version path, run it and reduce the findings.

use std::path::Path;
use std::sync::Arc;

use crate::config::UpgradeConfig;
use crate::fs::{DiskFs, FileSystem, skip_dirs_with};
use crate::project::Project;
use crate::rules::{Finding, RuleEngine, UpgradeError, rules_for};

pub fn run_upgrade_analysis(root: &Path, from: &str, to: &str) -> Result<Vec<Finding>, UpgradeError> {
    let config = UpgradeConfig::load_or_default(root);
    run_upgrade_analysis_with(Arc::new(DiskFs), root, from, to, &config)
}

/// Same as [`run_upgrade_analysis`] with an injected file system and
/// configuration.
pub fn run_upgrade_analysis_with(
    fs: Arc<dyn FileSystem>,
    root: &Path,
    from: &str,
    to: &str,
    config: &UpgradeConfig,
) -> Result<Vec<Finding>, UpgradeError> {
    let project = Project::load(fs, root, &skip_dirs_with(&config.skip_dirs));
    analyze_project(&project, from, to, config)
}

/// Runs the rules for `from -> to` against an already loaded project.
pub fn analyze_project(
    project: &Project,
    from: &str,
    to: &str,
    config: &UpgradeConfig,
) -> Result<Vec<Finding>, UpgradeError> {
    let rules = rules_for(from, to)?;
    let engine = RuleEngine::new(rules).without(&config.exclude_rules);
    Ok(engine.run(project))
}
