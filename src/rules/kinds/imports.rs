//! Import rewriting rules. Both parse the named import set of every
//! declaration that imports from the affected module and render a minimal
//! replacement, keeping the original specifier order.

use crate::project::Project;
use crate::rules::syntax::{ImportName, imports};
use crate::rules::{Finding, Occurrence, ResolutionType, Rule, RuleInfo, Severity};

/// Named imports that `module` no longer exports.
pub struct ImportRemovalRule {
    info: RuleInfo,
    module: String,
    names: Vec<String>,
}

impl ImportRemovalRule {
    pub fn new(id: &str, module: &str, names: &[&str]) -> Self {
        let info = RuleInfo::new(id, format!("{} imports", module))
            .description(format!("Stop importing {} from {}", names.join(", "), module))
            .resolution(ResolutionType::Ts, "")
            .severity(Severity::Required)
            .property("module", module);
        Self {
            info,
            module: module.to_string(),
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info = self.info.description(description);
        self
    }
}

impl Rule for ImportRemovalRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let mut occurrences = Vec::new();
        for file in &project.source_files {
            for decl in imports(file).iter().filter(|d| d.module == self.module) {
                let kept: Vec<ImportName> = decl
                    .named
                    .iter()
                    .filter(|n| !self.names.contains(&n.name))
                    .cloned()
                    .collect();

                let original = decl.render_with(&self.module, &decl.named, true);
                let replacement = decl.render_with(&self.module, &kept, true);
                if replacement == original {
                    continue;
                }

                let resolution = replacement
                    .unwrap_or_else(|| format!("// remove: {}", decl.text.trim()));
                occurrences.push(
                    Occurrence::new(project.relative(file.path()), resolution).at(decl.position),
                );
            }
        }
        self.info.finding(occurrences).into_iter().collect()
    }
}

/// Named imports that moved from one module to another.
pub struct ImportRelocationRule {
    info: RuleInfo,
    from: String,
    to: String,
    names: Vec<String>,
}

impl ImportRelocationRule {
    pub fn new(id: &str, from: &str, to: &str, names: &[&str]) -> Self {
        let info = RuleInfo::new(id, format!("{} imports", to))
            .description(format!("Import {} from {} instead of {}", names.join(", "), to, from))
            .resolution(ResolutionType::Ts, "")
            .severity(Severity::Required)
            .property("from", from)
            .property("to", to);
        Self {
            info,
            from: from.to_string(),
            to: to.to_string(),
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info = self.info.description(description);
        self
    }
}

impl Rule for ImportRelocationRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let mut occurrences = Vec::new();
        for file in &project.source_files {
            for decl in imports(file).iter().filter(|d| d.module == self.from) {
                let (moved, kept): (Vec<ImportName>, Vec<ImportName>) = decl
                    .named
                    .iter()
                    .cloned()
                    .partition(|n| self.names.contains(&n.name));

                let original = decl.render_with(&self.from, &decl.named, true);
                let rewritten = decl.render_with(&self.from, &kept, true);
                if rewritten == original {
                    continue;
                }
                let Some(statement) = decl.render_with(&self.to, &moved, false) else {
                    continue;
                };

                // new-module import first, then what is left of the old one
                let path = project.relative(file.path());
                occurrences.push(Occurrence::new(path.clone(), statement).at(decl.position));
                let remainder = rewritten.unwrap_or_else(|| format!("// remove: {}", decl.text.trim()));
                occurrences.push(Occurrence::new(path, remainder).at(decl.position));
            }
        }
        self.info.finding(occurrences).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Position;
    use crate::rules::kinds::test_support::project;

    const WEB_PART: &str = r#"import * as React from 'react';
import { PrimaryButton, Stack, TextField } from 'office-ui-fabric-react';

export const A = () => null;
"#;

    fn relocation() -> ImportRelocationRule {
        ImportRelocationRule::new(
            "FN016010",
            "office-ui-fabric-react",
            "@fluentui/react",
            &["PrimaryButton", "TextField"],
        )
    }

    #[test]
    fn test_relocation_renders_single_import_of_moved_bindings() {
        let p = project(&[("src/components/A.tsx", WEB_PART)]);
        let findings = relocation().visit(&p, &[]);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].occurrences.len(), 2);
        let occ = &findings[0].occurrences[0];
        assert_eq!(occ.resolution, "import { PrimaryButton, TextField } from '@fluentui/react';");
        assert_eq!(occ.file, "src/components/A.tsx");
        assert_eq!(occ.position, Some(Position { line: 2, character: 0 }));

        let rest = &findings[0].occurrences[1];
        assert_eq!(rest.resolution, "import { Stack } from 'office-ui-fabric-react';");
        assert_eq!(rest.position, occ.position);
    }

    #[test]
    fn test_relocation_of_every_binding_removes_old_statement() {
        let p = project(&[("src/a.ts", "import { TextField, PrimaryButton } from 'office-ui-fabric-react';
")]);
        let findings = relocation().visit(&p, &[]);
        let resolutions: Vec<&str> = findings[0].occurrences.iter().map(|o| o.resolution.as_str()).collect();
        assert_eq!(
            resolutions,
            vec![
                "import { TextField, PrimaryButton } from '@fluentui/react';",
                "// remove: import { TextField, PrimaryButton } from 'office-ui-fabric-react';",
            ]
        );
    }

    #[test]
    fn test_relocation_keeps_default_binding_on_old_module() {
        let p = project(&[("src/a.ts", "import Fabric, { PrimaryButton } from 'office-ui-fabric-react';
")]);
        let findings = relocation().visit(&p, &[]);
        assert_eq!(
            findings[0].occurrences[1].resolution,
            "import Fabric from 'office-ui-fabric-react';"
        );
    }

    #[test]
    fn test_relocation_ignores_unrelated_imports() {
        let p = project(&[("src/a.ts", "import { Stack } from 'office-ui-fabric-react';\nimport { PrimaryButton } from '@fluentui/react';\n")]);
        assert!(relocation().visit(&p, &[]).is_empty());
    }

    #[test]
    fn test_relocation_tolerates_malformed_source() {
        let p = project(&[("src/a.ts", "import { PrimaryButton from 'office-ui-fabric-react'\nconst = ;")]);
        assert!(relocation().visit(&p, &[]).is_empty());
    }

    #[test]
    fn test_removal_rewrites_remaining_bindings() {
        let p = project(&[(
            "src/a.ts",
            "import { escape, cloneDeep } from '@microsoft/sp-lodash-subset';\n",
        )]);
        let rule = ImportRemovalRule::new("FN016011", "@microsoft/sp-lodash-subset", &["escape"]);
        let findings = rule.visit(&p, &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].occurrences[0].resolution,
            "import { cloneDeep } from '@microsoft/sp-lodash-subset';"
        );
    }

    #[test]
    fn test_removal_of_last_binding_removes_statement() {
        let p = project(&[("src/a.ts", "import { escape } from \"@microsoft/sp-lodash-subset\";\n")]);
        let rule = ImportRemovalRule::new("FN016011", "@microsoft/sp-lodash-subset", &["escape"]);
        let findings = rule.visit(&p, &[]);
        assert_eq!(
            findings[0].occurrences[0].resolution,
            "// remove: import { escape } from \"@microsoft/sp-lodash-subset\";"
        );
    }

    #[test]
    fn test_removal_skips_identical_replacement() {
        let p = project(&[("src/a.ts", "import { cloneDeep } from '@microsoft/sp-lodash-subset';\n")]);
        let rule = ImportRemovalRule::new("FN016011", "@microsoft/sp-lodash-subset", &["escape"]);
        assert!(rule.visit(&p, &[]).is_empty());
    }
}
