use crate::project::Project;
use crate::rules::{Finding, ResolutionType, Rule, RuleInfo, Severity};

/// A line `.eslintrc.js` must carry. A project without the file is left to
/// the rule that adds it.
pub struct LintConfigRule {
    info: RuleInfo,
    line: String,
}

impl LintConfigRule {
    pub fn requires(id: &str, line: &str) -> Self {
        let info = RuleInfo::new(id, ".eslintrc.js")
            .description(format!("Add {} to .eslintrc.js", line))
            .resolution(ResolutionType::Js, line)
            .severity(Severity::Required)
            .file("./.eslintrc.js");
        Self {
            info,
            line: line.to_string(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info = self.info.description(description);
        self
    }
}

impl Rule for LintConfigRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let Some(text) = project.eslintrc.as_ref().and_then(|f| f.text()) else {
            return Vec::new();
        };
        let wanted = self.line.trim();
        if text.lines().any(|l| l.trim() == wanted) {
            return Vec::new();
        }
        vec![self.info.single_finding()]
    }
}
