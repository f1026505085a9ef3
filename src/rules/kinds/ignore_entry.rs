use crate::project::Project;
use crate::project::source::TextFile;
use crate::rules::{Finding, ResolutionType, Rule, RuleInfo, Severity, has_opposite_toggle};

/// Line-based ignore files of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreFile {
    Git,
    Npm,
}

impl IgnoreFile {
    pub fn name(&self) -> &'static str {
        match self {
            IgnoreFile::Git => ".gitignore",
            IgnoreFile::Npm => ".npmignore",
        }
    }

    fn get<'a>(&self, project: &'a Project) -> Option<&'a TextFile> {
        match self {
            IgnoreFile::Git => project.gitignore.as_ref(),
            IgnoreFile::Npm => project.npmignore.as_ref(),
        }
    }
}

/// An entry an ignore file must contain (`add`) or must not contain (`remove`).
///
/// A missing `.gitignore` counts as one without the entry. `.npmignore` is
/// optional, so its rules only apply when the file exists.
pub struct IgnoreEntryRule {
    info: RuleInfo,
    target: IgnoreFile,
    entry: String,
    add: bool,
}

impl IgnoreEntryRule {
    /// Rule on `.gitignore`.
    pub fn new(id: &str, entry: &str, add: bool) -> Self {
        Self::on(IgnoreFile::Git, id, entry, add)
    }

    /// Rule on `.npmignore`.
    pub fn npm(id: &str, entry: &str, add: bool) -> Self {
        Self::on(IgnoreFile::Npm, id, entry, add)
    }

    fn on(target: IgnoreFile, id: &str, entry: &str, add: bool) -> Self {
        let name = target.name();
        let description = if add {
            format!("To {} add the '{}' folder", name, entry)
        } else {
            format!("From {} remove the '{}' folder", name, entry)
        };
        let info = RuleInfo::new(id, format!("{} '{}' folder", name, entry))
            .description(description)
            .resolution(ResolutionType::Text, entry)
            .severity(Severity::Required)
            .file(format!("./{}", name))
            .property("add", add);
        Self {
            info,
            target,
            entry: entry.to_string(),
            add,
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.info = self.info.severity(severity);
        self
    }
}

/// `release`, `/release` and `release/` name the same folder.
fn normalize(entry: &str) -> &str {
    entry.trim().trim_matches('/')
}

impl Rule for IgnoreEntryRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, prior: &[Finding]) -> Vec<Finding> {
        let wanted = normalize(&self.entry);
        let file = self.target.get(project);
        if file.is_none() && self.target == IgnoreFile::Npm {
            return Vec::new();
        }
        let present = file
            .map(|f| f.entries().iter().any(|e| normalize(e) == wanted))
            .unwrap_or(false);

        if present == self.add {
            return Vec::new();
        }
        if has_opposite_toggle(prior, &self.info.id, "add", self.add) {
            return Vec::new();
        }
        vec![self.info.single_finding()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::kinds::test_support::project;

    #[test]
    fn test_missing_gitignore_needs_entry() {
        let p = project(&[]);
        let findings = IgnoreEntryRule::new("FN023001", "release", true).visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].occurrences.len(), 1);
        assert_eq!(findings[0].occurrences[0].resolution, "release");
        assert_eq!(findings[0].occurrences[0].file, "./.gitignore");
    }

    #[test]
    fn test_entry_matching_ignores_slashes_and_comments() {
        let p = project(&[(".gitignore", "# build\n/release/\nnode_modules\n# .heft\n")]);
        assert!(IgnoreEntryRule::new("FN023001", "release", true).visit(&p, &[]).is_empty());
        assert_eq!(IgnoreEntryRule::new("FN023002", ".heft", true).visit(&p, &[]).len(), 1);
    }

    #[test]
    fn test_remove_entry() {
        let p = project(&[(".gitignore", "temp\nlib\n")]);
        let findings = IgnoreEntryRule::new("FN023003", "temp", false).visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].description.starts_with("From .gitignore remove"));
        assert!(IgnoreEntryRule::new("FN023003", "temp", false).visit(&project(&[]), &[]).is_empty());
    }

    #[test]
    fn test_same_id_opposite_toggles_yield_one_finding() {
        let add = IgnoreEntryRule::new("FN023004", "sharepoint", true);
        let remove = IgnoreEntryRule::new("FN023004", "sharepoint", false);

        for gitignore in ["", "sharepoint\n"] {
            let p = project(&[(".gitignore", gitignore)]);
            let mut findings = add.visit(&p, &[]);
            let more = remove.visit(&p, &findings);
            findings.extend(more);
            assert!(findings.len() <= 1, "got {:?}", findings);
        }
    }

    #[test]
    fn test_npmignore_rules_need_the_file() {
        let rule = IgnoreEntryRule::npm("FN024001", ".heft", true).severity(Severity::Optional);
        assert!(rule.visit(&project(&[(".gitignore", "node_modules\n")]), &[]).is_empty());

        let p = project(&[(".gitignore", ".heft\n"), (".npmignore", "!dist\nconfig\n")]);
        let findings = rule.visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].occurrences[0].file, "./.npmignore");
        assert_eq!(findings[0].severity, Severity::Optional);

        let p = project(&[(".npmignore", "/.heft/\n")]);
        assert!(rule.visit(&p, &[]).is_empty());
    }
}
