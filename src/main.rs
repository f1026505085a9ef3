//! # Sentinel Upgrade
//!
//! Static analysis of SharePoint Framework projects: finds what must change to
//! move a project from one framework version to another and prints the fixes
//! as a report.

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::EnvFilter;

pub mod analysis;
pub mod commands;
pub mod config;
pub mod fs;
pub mod project;
pub mod report;
pub mod rules;

/// `--verbose` wins over `RUST_LOG`; bad or missing directives fall back to `warn`.
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn init_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cli.command {
        Commands::Check { path, from, to, format } => {
            commands::check::handle_check(commands::check::CheckArgs { path, from, to, format })
        }
        Commands::Rules { from, to } => commands::rules::handle_rules_command(&from, to.as_deref()),
        Commands::Versions => commands::rules::handle_versions_command(),
    };

    std::process::exit(code);
}
