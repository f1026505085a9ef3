use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use colored::Colorize;

use super::{EXIT_CLEAN, EXIT_CONFIG_ERROR, EXIT_FINDINGS};
use crate::analysis::analyze_project;
use crate::config::UpgradeConfig;
use crate::fs::{DiskFs, FileSystem, skip_dirs_with};
use crate::project::Project;
use crate::report::{self, ReportFormat, ReportMeta};
use crate::rules::catalog::latest_version;

pub struct CheckArgs {
    pub path: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub format: Option<String>,
}

/// Runs `check` and returns the process exit code.
pub fn handle_check(args: CheckArgs) -> i32 {
    match run_check(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "❌".red(), e);
            EXIT_CONFIG_ERROR
        }
    }
}

fn resolve_root(path: Option<&str>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => {
            let root = PathBuf::from(p);
            if !root.is_dir() {
                return Err(anyhow!("'{}' is not a directory", p));
            }
            Ok(root)
        }
        None => {
            let cwd = std::env::current_dir().context("cannot read the current directory")?;
            Ok(UpgradeConfig::find_project_root(&cwd).unwrap_or(cwd))
        }
    }
}

fn project_name(project: &Project) -> Option<String> {
    let manifest = project.package_json.as_ref()?.parsed()?;
    manifest.get("name")?.as_str().map(str::to_string)
}

fn run_check(args: CheckArgs) -> anyhow::Result<i32> {
    let root = resolve_root(args.path.as_deref())?;
    let config = UpgradeConfig::load_or_default(&root);
    let fs: Arc<dyn FileSystem> = Arc::new(DiskFs);

    let format_name = args
        .format
        .or_else(|| config.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = ReportFormat::parse(&format_name)
        .ok_or_else(|| anyhow!("unknown report format '{}'", format_name))?;

    let project = Project::load(fs, &root, &skip_dirs_with(&config.skip_dirs));
    let from = match args.from {
        Some(v) => v,
        None => project
            .detect_version()
            .ok_or_else(|| anyhow!("cannot detect the project version, pass --from"))?,
    };
    let to = args.to.unwrap_or_else(|| latest_version().to_string());

    let findings = analyze_project(&project, &from, &to, &config)?;

    let name = project_name(&project).unwrap_or_else(|| root.display().to_string());
    let meta = ReportMeta::new(&name, &from, &to);
    print!("{}", report::render(&findings, format, &meta));

    if format == ReportFormat::Text {
        if findings.is_empty() {
            println!("{} Project is compatible with v{}.", "✅".green(), to);
        } else {
            let (required, recommended, optional) = report::severity_counts(&findings);
            println!(
                "🚩 {} required  ⚠️  {} recommended  ℹ️  {} optional",
                required.to_string().red().bold(),
                recommended.to_string().yellow(),
                optional.to_string().blue()
            );
        }
    }

    Ok(if findings.is_empty() { EXIT_CLEAN } else { EXIT_FINDINGS })
}
