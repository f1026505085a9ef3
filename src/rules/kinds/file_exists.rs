use crate::project::Project;
use crate::rules::{Finding, ResolutionType, Rule, RuleInfo, Severity, has_opposite_toggle};

/// A file that must exist (`add`) or must be gone (`remove`).
pub struct FileExistsRule {
    info: RuleInfo,
    path: String,
    add: bool,
}

impl FileExistsRule {
    /// `contents` becomes the resolution text, typed by `resolution_type`.
    pub fn add(id: &str, path: &str, resolution_type: ResolutionType, contents: &str) -> Self {
        let info = RuleInfo::new(id, path)
            .description(format!("Add file {}", path))
            .resolution(resolution_type, contents)
            .severity(Severity::Required)
            .file(format!("./{}", path))
            .property("add", true);
        Self {
            info,
            path: path.to_string(),
            add: true,
        }
    }

    pub fn remove(id: &str, path: &str) -> Self {
        let info = RuleInfo::new(id, path)
            .description(format!("Remove file {}", path))
            .resolution(ResolutionType::Cmd, format!("rm \"{}\"", path))
            .severity(Severity::Required)
            .file(format!("./{}", path))
            .property("add", false);
        Self {
            info,
            path: path.to_string(),
            add: false,
        }
    }
}

impl Rule for FileExistsRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, prior: &[Finding]) -> Vec<Finding> {
        if project.file_exists(&self.path) == self.add {
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

    const ESLINTRC: &str = "require('@rushstack/eslint-config/patch/modern-module-resolution');";

    #[test]
    fn test_add_reports_missing_file_once() {
        let p = project(&[("package.json", "{}")]);
        let rule = FileExistsRule::add("FN015007", ".eslintrc.js", ResolutionType::Js, ESLINTRC);

        let findings = rule.visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].occurrences.len(), 1);
        assert_eq!(findings[0].occurrences[0].file, "./.eslintrc.js");
        assert_eq!(findings[0].occurrences[0].resolution, ESLINTRC);
        assert_eq!(findings[0].description, "Add file .eslintrc.js");
    }

    #[test]
    fn test_add_is_quiet_when_file_exists() {
        let p = project(&[(".eslintrc.js", ESLINTRC)]);
        let rule = FileExistsRule::add("FN015007", ".eslintrc.js", ResolutionType::Js, ESLINTRC);
        assert!(rule.visit(&p, &[]).is_empty());
    }

    #[test]
    fn test_remove_reports_existing_file() {
        let p = project(&[("tslint.json", "{}")]);
        let rule = FileExistsRule::remove("FN015003", "tslint.json");
        let findings = rule.visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].description, "Remove file tslint.json");
        assert!(FileExistsRule::remove("FN015003", "tslint.json").visit(&project(&[]), &[]).is_empty());
    }

    #[test]
    fn test_opposite_prior_finding_blocks_toggle() {
        // file missing: the add rule fires, the remove rule never would
        let missing = project(&[]);
        let add = FileExistsRule::add("FN015008", ".npmignore", ResolutionType::Text, "!dist");
        let prior = add.visit(&missing, &[]);
        assert_eq!(prior.len(), 1);

        // file present: the remove rule would fire, but the add finding for
        // the same id is already there
        let present = project(&[(".npmignore", "!dist")]);
        let remove = FileExistsRule::remove("FN015008", ".npmignore");
        assert_eq!(remove.visit(&present, &[]).len(), 1);
        assert!(remove.visit(&present, &prior).is_empty());
    }
}
