//! Version-path resolution.
//!
//! The catalog is a table of single upgrade steps; a longer path is the
//! concatenation of the steps between its endpoints.

use thiserror::Error;

use super::Rule;
use super::upgrades;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpgradeError {
    #[error("upgrading from {from} to {to} is not supported")]
    NotSupported { from: String, to: String },
}

pub struct UpgradeStep {
    pub from: &'static str,
    pub to: &'static str,
    pub rules: fn() -> Vec<Box<dyn Rule>>,
}

/// Consecutive steps, oldest first. Each `to` is the next step's `from`.
pub static STEPS: &[UpgradeStep] = &[
    UpgradeStep { from: "1.14.0", to: "1.15.0", rules: upgrades::to_1_15_0::rules },
    UpgradeStep { from: "1.15.0", to: "1.15.2", rules: upgrades::to_1_15_2::rules },
    UpgradeStep { from: "1.15.2", to: "1.16.0", rules: upgrades::to_1_16_0::rules },
];

/// Every version the catalog knows, oldest first.
pub fn supported_versions() -> Vec<&'static str> {
    let mut versions: Vec<&'static str> = STEPS.iter().map(|s| s.from).collect();
    if let Some(last) = STEPS.last() {
        versions.push(last.to);
    }
    versions
}

pub fn latest_version() -> &'static str {
    STEPS.last().map(|s| s.to).unwrap_or_default()
}

/// The steps leading from `from` to `to`.
pub fn path_for(from: &str, to: &str) -> Result<&'static [UpgradeStep], UpgradeError> {
    let not_supported = || UpgradeError::NotSupported {
        from: from.to_string(),
        to: to.to_string(),
    };
    let start = STEPS.iter().position(|s| s.from == from).ok_or_else(not_supported)?;
    let end = STEPS.iter().position(|s| s.to == to).ok_or_else(not_supported)?;
    if end < start {
        return Err(not_supported());
    }
    Ok(&STEPS[start..=end])
}

/// Ordered rule list for upgrading from `from` to `to`.
pub fn rules_for(from: &str, to: &str) -> Result<Vec<Box<dyn Rule>>, UpgradeError> {
    Ok(path_for(from, to)?.iter().flat_map(|step| (step.rules)()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_are_contiguous() {
        for pair in STEPS.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(supported_versions(), vec!["1.14.0", "1.15.0", "1.15.2", "1.16.0"]);
        assert_eq!(latest_version(), "1.16.0");
    }

    #[test]
    fn test_single_step_path() {
        let rules = rules_for("1.15.0", "1.15.2").unwrap();
        let direct = (STEPS[1].rules)();
        let ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        let expected: Vec<&str> = direct.iter().map(|r| r.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_chained_path_concatenates_steps_in_order() {
        let chained = rules_for("1.14.0", "1.16.0").unwrap();
        let expected: usize = STEPS.iter().map(|s| (s.rules)().len()).sum();
        assert_eq!(chained.len(), expected);

        let first_step = (STEPS[0].rules)();
        assert_eq!(chained[0].id(), first_step[0].id());
        let last_step = (STEPS[2].rules)();
        assert_eq!(chained.last().map(|r| r.id()), last_step.last().map(|r| r.id()));
    }

    #[test]
    fn test_unsupported_paths() {
        for (from, to) in [("1.13.0", "1.15.0"), ("1.15.0", "1.17.0"), ("1.15.2", "1.15.0"), ("1.15.0", "1.15.0")] {
            let err = rules_for(from, to).err().expect("path must be rejected");
            assert_eq!(
                err,
                UpgradeError::NotSupported { from: from.to_string(), to: to.to_string() }
            );
        }
    }

    #[test]
    fn test_rule_ids_unique_within_a_step() {
        for step in STEPS {
            let rules = (step.rules)();
            let mut ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate id in step {} -> {}", step.from, step.to);
        }
    }
}
