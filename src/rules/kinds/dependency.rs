use crate::project::Project;
use crate::rules::{Finding, ResolutionType, Rule, RuleInfo, Severity};

/// A package in `dependencies` / `devDependencies` must be installed at a
/// given version, or removed.
pub struct DependencyRule {
    info: RuleInfo,
    package: String,
    version: Option<String>,
    dev: bool,
    optional: bool,
    only_if_installed: Option<String>,
}

impl DependencyRule {
    /// Install or upgrade `package` to exactly `version`.
    pub fn upgrade(id: &str, package: &str, version: &str, dev: bool) -> Self {
        let flag = if dev { "-DE" } else { "-SE" };
        let kind = if dev { "devDependency" } else { "dependency" };
        let info = RuleInfo::new(id, package)
            .description(format!("Upgrade SharePoint Framework {} package {}", kind, package))
            .resolution(ResolutionType::Cmd, format!("npm i {} {}@{}", flag, package, version))
            .severity(Severity::Required)
            .file("./package.json")
            .property("packageName", package)
            .property("packageVersion", version)
            .property("isDevDep", dev);
        Self {
            info,
            package: package.to_string(),
            version: Some(version.to_string()),
            dev,
            optional: false,
            only_if_installed: None,
        }
    }

    /// Uninstall `package`.
    pub fn remove(id: &str, package: &str, dev: bool) -> Self {
        let flag = if dev { "-D" } else { "-S" };
        let kind = if dev { "devDependency" } else { "dependency" };
        let info = RuleInfo::new(id, package)
            .description(format!("Remove SharePoint Framework {} package {}", kind, package))
            .resolution(ResolutionType::Cmd, format!("npm un {} {}", flag, package))
            .severity(Severity::Required)
            .file("./package.json")
            .property("packageName", package)
            .property("isDevDep", dev);
        Self {
            info,
            package: package.to_string(),
            version: None,
            dev,
            optional: false,
            only_if_installed: None,
        }
    }

    /// Only upgrade when the package is already installed; never suggest
    /// installing it.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.info.severity = Severity::Optional;
        self
    }

    /// Only report when `package` is installed (in either section).
    pub fn only_if_installed(mut self, package: &str) -> Self {
        self.only_if_installed = Some(package.to_string());
        self
    }

    pub fn supersedes(mut self, ids: &[&str]) -> Self {
        self.info = self.info.supersedes(ids);
        self
    }

    fn section(&self) -> &'static str {
        if self.dev { "devDependencies" } else { "dependencies" }
    }
}

impl Rule for DependencyRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let Some(manifest) = project.package_json.as_ref().and_then(|f| f.parsed()) else {
            return Vec::new();
        };
        if let Some(required) = &self.only_if_installed {
            if project.dependency_version(required).is_none() {
                return Vec::new();
            }
        }

        let installed = manifest
            .get(self.section())
            .and_then(|s| s.get(&self.package))
            .and_then(|v| v.as_str());

        let report = match (&self.version, installed) {
            (None, installed) => installed.is_some(),
            (Some(_), None) => !self.optional,
            (Some(target), Some(current)) => version_lt(current, target),
        };

        if report {
            vec![self.info.single_finding()]
        } else {
            Vec::new()
        }
    }
}

/// Numeric `major.minor.patch` of a version or simple range (`^1.2.3`,
/// `~1.2.3`, `1.2.3-beta.1`). Missing parts count as zero.
fn parse_version(version: &str) -> Option<Vec<u64>> {
    let core = version
        .trim()
        .trim_start_matches(['^', '~', '=', 'v'])
        .split(['-', '+'])
        .next()?;
    let parts: Option<Vec<u64>> = core.split('.').map(|p| p.parse().ok()).collect();
    let mut parts = parts?;
    parts.resize(3, 0);
    Some(parts)
}

/// `current < target`. Unparseable versions (tags, urls, workspace links)
/// are considered out of date unless they match the target literally.
pub fn version_lt(current: &str, target: &str) -> bool {
    match (parse_version(current), parse_version(target)) {
        (Some(c), Some(t)) => c < t,
        _ => current.trim() != target.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::kinds::test_support::project;

    const PACKAGE: &str = r#"{
  "dependencies": {
    "@microsoft/sp-core-library": "1.14.0",
    "office-ui-fabric-react": "^7.174.1"
  },
  "devDependencies": {
    "@microsoft/sp-build-web": "1.15.0",
    "@microsoft/sp-tslint-rules": "1.14.0"
  }
}"#;

    #[test]
    fn test_outdated_dependency_is_reported() {
        let p = project(&[("package.json", PACKAGE)]);
        let rule = DependencyRule::upgrade("FN001001", "@microsoft/sp-core-library", "1.15.0", false);
        let findings = rule.visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].occurrences[0].resolution,
            "npm i -SE @microsoft/sp-core-library@1.15.0"
        );
        assert_eq!(findings[0].occurrences[0].file, "./package.json");
    }

    #[test]
    fn test_up_to_date_dev_dependency_is_not_reported() {
        let p = project(&[("package.json", PACKAGE)]);
        let rule = DependencyRule::upgrade("FN002001", "@microsoft/sp-build-web", "1.15.0", true);
        assert!(rule.visit(&p, &[]).is_empty());
    }

    #[test]
    fn test_missing_dependency_is_installed_unless_optional() {
        let p = project(&[("package.json", PACKAGE)]);
        let required = DependencyRule::upgrade("FN002025", "@microsoft/rush-stack-compiler-4.5", "0.2.2", true);
        let optional = DependencyRule::upgrade("FN001004", "@microsoft/sp-webpart-base", "1.15.0", false).optional();

        assert_eq!(required.visit(&p, &[]).len(), 1);
        assert!(optional.visit(&p, &[]).is_empty());
    }

    #[test]
    fn test_remove_reports_only_installed_packages() {
        let p = project(&[("package.json", PACKAGE)]);
        let present = DependencyRule::remove("FN002027", "@microsoft/sp-tslint-rules", true);
        let absent = DependencyRule::remove("FN002026", "@microsoft/rush-stack-compiler-3.9", true);

        let findings = present.visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].occurrences[0].resolution, "npm un -D @microsoft/sp-tslint-rules");
        assert!(absent.visit(&p, &[]).is_empty());
    }

    #[test]
    fn test_only_if_installed_gates_the_rule() {
        let p = project(&[("package.json", PACKAGE)]);
        let gated = DependencyRule::upgrade("FN001034", "@fluentui/react", "7.199.1", false)
            .only_if_installed("office-ui-fabric-react");
        let never = DependencyRule::upgrade("FN001035", "@fluentui/react", "7.199.1", false)
            .only_if_installed("@fluentui/react-northstar");

        assert_eq!(gated.visit(&p, &[]).len(), 1);
        assert!(never.visit(&p, &[]).is_empty());
    }

    #[test]
    fn test_missing_or_broken_package_json_reports_nothing() {
        let rule = DependencyRule::upgrade("FN001001", "@microsoft/sp-core-library", "1.15.0", false);
        assert!(rule.visit(&project(&[]), &[]).is_empty());
        assert!(rule.visit(&project(&[("package.json", "{ broken")]), &[]).is_empty());
    }

    #[test]
    fn test_version_lt() {
        assert!(version_lt("1.14.0", "1.15.0"));
        assert!(version_lt("^7.174.1", "7.185.7"));
        assert!(!version_lt("1.15.2", "1.15.0"));
        assert!(!version_lt("1.15.0", "1.15.0"));
        assert!(!version_lt("1.15.0-beta.6", "1.15.0"));
        assert!(version_lt("latest", "1.15.0"));
    }
}
