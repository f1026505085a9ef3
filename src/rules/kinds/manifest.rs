use serde_json::Value;

use super::json_snippet;
use super::json_property::JsonCheck;
use crate::project::Project;
use crate::rules::{Finding, Occurrence, ResolutionType, Rule, RuleInfo, Severity};

/// A property every component manifest (optionally of one component type)
/// must satisfy. One occurrence per offending manifest.
pub struct ManifestPropertyRule {
    info: RuleInfo,
    component_type: Option<String>,
    pointer: String,
    check: JsonCheck,
}

impl ManifestPropertyRule {
    pub fn new(id: &str, component_type: Option<&str>, pointer: &str, check: JsonCheck) -> Self {
        let property = pointer.rsplit('/').next().unwrap_or(pointer).to_string();
        let resolution = match &check {
            JsonCheck::Equals(v) | JsonCheck::Present(v) => json_snippet(pointer, v),
            JsonCheck::Absent => json_snippet(pointer, &Value::String(String::new())),
        };
        let scope = component_type.unwrap_or("component");
        let info = RuleInfo::new(id, format!("{} manifest {}", scope, property))
            .description(format!("Update {} in {} manifests", property, scope))
            .resolution(ResolutionType::Json, resolution)
            .severity(Severity::Recommended)
            .property("pointer", pointer);
        Self {
            info,
            component_type: component_type.map(str::to_string),
            pointer: pointer.to_string(),
            check,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info = self.info.description(description);
        self
    }

    fn applies_to(&self, component_type: &str) -> bool {
        match &self.component_type {
            Some(wanted) => component_type == wanted || component_type.starts_with(&format!("{}/", wanted)),
            None => true,
        }
    }
}

impl Rule for ManifestPropertyRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let occurrences = project
            .manifests
            .iter()
            .filter(|m| self.applies_to(&m.component_type))
            .filter(|m| {
                let Some(current) = m.file.parsed() else {
                    return false;
                };
                match (&self.check, current.pointer(&self.pointer)) {
                    (JsonCheck::Equals(expected), Some(value)) => value != expected,
                    (JsonCheck::Equals(_), None) => true,
                    (JsonCheck::Present(_), found) => found.is_none(),
                    (JsonCheck::Absent, found) => found.is_some(),
                }
            })
            .map(|m| Occurrence::new(project.relative(m.file.path()), self.info.resolution.clone()))
            .collect();

        self.info.finding(occurrences).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::kinds::test_support::project;

    #[test]
    fn test_one_occurrence_per_offending_web_part() {
        let p = project(&[
            (
                "src/webparts/a/AWebPart.manifest.json",
                r#"{ "id": "a", "componentType": "WebPart" }"#,
            ),
            (
                "src/webparts/b/BWebPart.manifest.json",
                r#"{ "id": "b", "componentType": "WebPart", "supportedHosts": ["SharePointWebPart"] }"#,
            ),
            (
                "src/webparts/c/CWebPart.manifest.json",
                r#"{ "id": "c", "componentType": "WebPart" }"#,
            ),
            (
                "src/extensions/d/DCommandSet.manifest.json",
                r#"{ "id": "d", "componentType": "Extension", "extensionType": "ListViewCommandSet" }"#,
            ),
        ]);
        let rule = ManifestPropertyRule::new(
            "FN011011",
            Some("WebPart"),
            "/supportedHosts",
            JsonCheck::Present(serde_json::json!(["SharePointWebPart"])),
        );

        let findings = rule.visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        let files: Vec<&str> = findings[0].occurrences.iter().map(|o| o.file.as_str()).collect();
        assert_eq!(
            files,
            vec!["src/webparts/a/AWebPart.manifest.json", "src/webparts/c/CWebPart.manifest.json"]
        );
    }

    #[test]
    fn test_extension_type_prefix_matches() {
        let p = project(&[(
            "src/extensions/d/DCommandSet.manifest.json",
            r#"{ "id": "d", "componentType": "Extension", "extensionType": "ListViewCommandSet" }"#,
        )]);
        let rule = ManifestPropertyRule::new(
            "FN011012",
            Some("Extension"),
            "/requiresCustomScript",
            JsonCheck::Present(Value::Bool(false)),
        );
        assert_eq!(rule.visit(&p, &[]).len(), 1);
    }

    #[test]
    fn test_no_manifests_no_finding() {
        let rule = ManifestPropertyRule::new("FN011011", None, "/supportedHosts", JsonCheck::Absent);
        assert!(rule.visit(&project(&[]), &[]).is_empty());
    }
}
