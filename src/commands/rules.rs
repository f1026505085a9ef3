use colored::Colorize;

use super::{EXIT_CLEAN, EXIT_CONFIG_ERROR};
use crate::rules::catalog::{latest_version, supported_versions};
use crate::rules::{Severity, rules_for};

pub fn handle_rules_command(from: &str, to: Option<&str>) -> i32 {
    let to = to.unwrap_or_else(|| latest_version());
    let rules = match rules_for(from, to) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e);
            return EXIT_CONFIG_ERROR;
        }
    };

    println!("\n{}", format!("Rules for {} -> {}:", from, to).bold());
    for rule in &rules {
        let info = rule.info();
        let severity = match info.severity {
            Severity::Required => info.severity.as_str().red(),
            Severity::Recommended => info.severity.as_str().yellow(),
            Severity::Optional => info.severity.as_str().blue(),
        };
        println!(
            "  {:<10} {:<13} {}",
            info.id.yellow(),
            format!("[{}]", severity),
            info.title
        );
    }
    println!("\n   {} rule(s)", rules.len());
    EXIT_CLEAN
}

pub fn handle_versions_command() -> i32 {
    println!("\n{}", "Supported versions:".bold());
    let latest = latest_version();
    for version in supported_versions() {
        if version == latest {
            println!("  {} {}", version.green(), "(latest)".dimmed());
        } else {
            println!("  {}", version);
        }
    }
    EXIT_CLEAN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_command_exit_codes() {
        assert_eq!(handle_rules_command("1.14.0", None), EXIT_CLEAN);
        assert_eq!(handle_rules_command("1.16.0", Some("1.14.0")), EXIT_CONFIG_ERROR);
    }
}
