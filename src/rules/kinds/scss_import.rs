use crate::project::Project;
use crate::rules::{Finding, Occurrence, ResolutionType, Rule, RuleInfo, Severity, has_opposite_toggle};

/// A style-sheet import every `.scss` file must contain (`add`) or must not
/// contain (`remove`). Matching is a plain substring search on the import
/// path.
pub struct ScssImportRule {
    info: RuleInfo,
    import: String,
    add: bool,
}

impl ScssImportRule {
    pub fn new(id: &str, import: &str, add: bool) -> Self {
        let description = if add {
            format!("Add the '{}' import to SCSS files", import)
        } else {
            format!("Remove the '{}' import from SCSS files", import)
        };
        let info = RuleInfo::new(id, format!("scss {}", import))
            .description(description)
            .resolution(ResolutionType::Scss, format!("@import '{}';", import))
            .severity(Severity::Optional)
            .property("add", add);
        Self {
            info,
            import: import.to_string(),
            add,
        }
    }
}

impl Rule for ScssImportRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, prior: &[Finding]) -> Vec<Finding> {
        if has_opposite_toggle(prior, &self.info.id, "add", self.add) {
            return Vec::new();
        }

        let occurrences = project
            .style_files
            .iter()
            .filter(|f| {
                f.text()
                    .map(|text| text.contains(&self.import) != self.add)
                    .unwrap_or(false)
            })
            .map(|f| Occurrence::new(project.relative(f.path()), self.info.resolution.clone()))
            .collect();

        self.info.finding(occurrences).into_iter().collect()
    }
}
