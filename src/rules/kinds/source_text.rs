use regex::Regex;

use crate::project::Project;
use crate::rules::{Finding, Occurrence, Position, ResolutionType, Rule, RuleInfo, Severity};

/// Lexical check over the raw text of every source file. One occurrence per
/// match, so it works even on files that do not parse.
pub struct SourceTextRule {
    info: RuleInfo,
    pattern: Regex,
}

impl SourceTextRule {
    pub fn new(id: &str, title: &str, pattern: Regex, resolution_type: ResolutionType, resolution: &str) -> Self {
        let info = RuleInfo::new(id, title)
            .resolution(resolution_type, resolution)
            .severity(Severity::Recommended)
            .property("pattern", pattern.as_str());
        Self { info, pattern }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info = self.info.description(description);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.info = self.info.severity(severity);
        self
    }
}

/// 1-based line and 0-based character of byte `offset` in `text`.
fn position_at(text: &str, offset: usize) -> Position {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Position {
        line,
        character: before[line_start..].chars().count(),
    }
}

impl Rule for SourceTextRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let mut occurrences = Vec::new();
        for file in &project.source_files {
            let Some(text) = file.text() else {
                continue;
            };
            let rel = project.relative(file.path());
            for m in self.pattern.find_iter(text) {
                occurrences.push(
                    Occurrence::new(rel.clone(), self.info.resolution.clone())
                        .at(position_at(text, m.start())),
                );
            }
        }
        self.info.finding(occurrences).into_iter().collect()
    }
}
