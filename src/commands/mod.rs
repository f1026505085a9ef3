pub mod check;
pub mod rules;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sentinel-upgrade", version)]
#[command(about = "Finds what must change to upgrade a SharePoint Framework project", long_about = None)]
pub struct Cli {
    /// Debug logging on stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project and print the upgrade report
    Check {
        /// Project root (defaults to the nearest folder with a package.json)
        path: Option<String>,
        /// Version the project is on (detected from .yo-rc.json or package.json)
        #[arg(long)]
        from: Option<String>,
        /// Version to upgrade to (defaults to the latest supported)
        #[arg(long)]
        to: Option<String>,
        /// Report format: json, text, md or tsv
        #[arg(short, long)]
        format: Option<String>,
    },
    /// List the rules applied between two versions
    Rules {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: Option<String>,
    },
    /// List supported versions
    Versions,
}

/// Exit codes shared by the command handlers.
pub const EXIT_CLEAN: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;
