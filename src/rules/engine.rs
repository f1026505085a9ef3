use tracing::debug;

use crate::project::Project;
use crate::rules::{Finding, Rule};

/// Runs an ordered rule list against a project and reduces the result.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Drops rules whose id is listed in `excluded`.
    pub fn without(mut self, excluded: &[String]) -> Self {
        if !excluded.is_empty() {
            self.rules.retain(|r| !excluded.iter().any(|id| id == r.id()));
        }
        self
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn run(&self, project: &Project) -> Vec<Finding> {
        let mut findings: Vec<Finding> = Vec::new();
        for rule in &self.rules {
            let emitted = rule.visit(project, &findings);
            if !emitted.is_empty() {
                debug!(rule = rule.id(), count = emitted.len(), "rule emitted findings");
            }
            findings.extend(emitted);
        }

        let collected = findings.len();
        let reduced = reduce(findings);
        debug!(
            rules = self.rules.len(),
            collected,
            reported = reduced.len(),
            "analysis finished"
        );
        reduced
    }
}

/// Removes superseded findings, then collapses findings sharing an id to the
/// last one.
///
/// A finding is superseded when another finding lists its id. When two
/// findings supersede each other the earlier one wins.
pub fn reduce(findings: Vec<Finding>) -> Vec<Finding> {
    let superseded: Vec<bool> = findings
        .iter()
        .enumerate()
        .map(|(i, f)| {
            findings.iter().enumerate().any(|(j, g)| {
                if i == j || !g.supersedes.contains(&f.id) {
                    return false;
                }
                // mutual: only the later one loses
                let mutual = f.supersedes.contains(&g.id);
                !mutual || j < i
            })
        })
        .collect();

    let survivors: Vec<Finding> = findings
        .into_iter()
        .zip(superseded)
        .filter(|(_, dropped)| !dropped)
        .map(|(f, _)| f)
        .collect();

    let mut result: Vec<Finding> = Vec::with_capacity(survivors.len());
    for (i, finding) in survivors.iter().enumerate() {
        let repeated_later = survivors[i + 1..].iter().any(|g| g.id == finding.id);
        if !repeated_later {
            result.push(finding.clone());
        }
    }
    result
}
