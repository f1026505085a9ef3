use serde_json::Value;

use super::json_snippet;
use crate::project::Project;
use crate::project::source::JsonFile;
use crate::rules::{Finding, Occurrence, ResolutionType, Rule, RuleInfo, Severity};

/// Well-known structured configuration files of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFile {
    PackageJson,
    YoRc,
    TsConfig,
    PackageSolution,
    Serve,
}

impl ConfigFile {
    pub fn path(&self) -> &'static str {
        match self {
            ConfigFile::PackageJson => "./package.json",
            ConfigFile::YoRc => "./.yo-rc.json",
            ConfigFile::TsConfig => "./tsconfig.json",
            ConfigFile::PackageSolution => "./config/package-solution.json",
            ConfigFile::Serve => "./config/serve.json",
        }
    }

    pub fn get<'a>(&self, project: &'a Project) -> Option<&'a JsonFile> {
        match self {
            ConfigFile::PackageJson => project.package_json.as_ref(),
            ConfigFile::YoRc => project.yo_rc_json.as_ref(),
            ConfigFile::TsConfig => project.tsconfig_json.as_ref(),
            ConfigFile::PackageSolution => project.package_solution_json.as_ref(),
            ConfigFile::Serve => project.serve_json.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsonCheck {
    /// The property must have exactly this value.
    Equals(Value),
    /// The property must exist; the value is the suggested default.
    Present(Value),
    /// The property must not exist.
    Absent,
}

/// A property of a structured config file, addressed by JSON pointer.
pub struct JsonPropertyRule {
    info: RuleInfo,
    target: ConfigFile,
    pointer: String,
    check: JsonCheck,
}

impl JsonPropertyRule {
    pub fn new(id: &str, target: ConfigFile, pointer: &str, check: JsonCheck) -> Self {
        let property = pointer.rsplit('/').next().unwrap_or(pointer).replace("~1", "/");
        let (description, resolution) = match &check {
            JsonCheck::Equals(value) => (
                format!("Update {} property in {}", property, target.path()),
                json_snippet(pointer, value),
            ),
            JsonCheck::Present(value) => (
                format!("Add {} property to {}", property, target.path()),
                json_snippet(pointer, value),
            ),
            JsonCheck::Absent => (
                format!("Remove {} property from {}", property, target.path()),
                json_snippet(pointer, &Value::String(String::new())),
            ),
        };
        let info = RuleInfo::new(id, format!("{} {}", target.path().trim_start_matches("./"), property))
            .description(description)
            .resolution(ResolutionType::Json, resolution)
            .severity(Severity::Required)
            .file(target.path())
            .property("pointer", pointer);
        Self {
            info,
            target,
            pointer: pointer.to_string(),
            check,
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.info = self.info.severity(severity);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info = self.info.description(description);
        self
    }
}

impl Rule for JsonPropertyRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let Some(file) = self.target.get(project) else {
            return Vec::new();
        };
        let Some(root) = file.parsed() else {
            return Vec::new();
        };
        let current = root.pointer(&self.pointer);

        let report = match (&self.check, current) {
            (JsonCheck::Equals(expected), Some(value)) => value != expected,
            (JsonCheck::Equals(_), None) => true,
            (JsonCheck::Present(_), found) => found.is_none(),
            (JsonCheck::Absent, found) => found.is_some(),
        };

        if !report {
            return Vec::new();
        }
        self.info
            .finding(vec![Occurrence::new(self.target.path(), self.info.resolution.clone())])
            .into_iter()
            .collect()
    }
}
