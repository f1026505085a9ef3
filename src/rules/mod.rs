pub mod catalog;
pub mod engine;
pub mod kinds;
pub mod syntax;
pub mod upgrades;

pub use catalog::{UpgradeError, rules_for};
pub use engine::RuleEngine;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::project::Project;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Required,
    Recommended,
    Optional,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Required => "required",
            Severity::Recommended => "recommended",
            Severity::Optional => "optional",
        }
    }
}

/// How the resolution text of a finding should be read: prose, a shell
/// command, or a code snippet in the given language.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionType {
    Text,
    Cmd,
    Json,
    Ts,
    Js,
    Scss,
}

impl ResolutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionType::Text => "text",
            ResolutionType::Cmd => "cmd",
            ResolutionType::Json => "json",
            ResolutionType::Ts => "ts",
            ResolutionType::Js => "js",
            ResolutionType::Scss => "scss",
        }
    }
}

/// 1-based line, 0-based character.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub file: String,
    pub resolution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Occurrence {
    pub fn new(file: impl Into<String>, resolution: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            resolution: resolution.into(),
            position: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub description: String,
    pub resolution_type: ResolutionType,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supersedes: Vec<String>,
    pub occurrences: Vec<Occurrence>,
}

/// Static metadata of a rule instance.
#[derive(Debug, Clone)]
pub struct RuleInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Default fix text, used for single-occurrence findings.
    pub resolution: String,
    pub resolution_type: ResolutionType,
    pub severity: Severity,
    /// Target file, relative to the project root.
    pub file: String,
    /// Ids of rules whose findings this rule's finding invalidates.
    pub supersedes: Vec<String>,
    pub properties: Map<String, Value>,
}

impl RuleInfo {
    pub fn new(id: &str, title: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            title: title.into(),
            description: String::new(),
            resolution: String::new(),
            resolution_type: ResolutionType::Text,
            severity: Severity::Required,
            file: String::new(),
            supersedes: Vec::new(),
            properties: Map::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn resolution(mut self, resolution_type: ResolutionType, resolution: impl Into<String>) -> Self {
        self.resolution_type = resolution_type;
        self.resolution = resolution.into();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    pub fn supersedes(mut self, ids: &[&str]) -> Self {
        self.supersedes = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Finding with the given occurrences. `None` when there is nothing to
    /// report, so a finding never carries an empty occurrence list.
    pub fn finding(&self, occurrences: Vec<Occurrence>) -> Option<Finding> {
        if occurrences.is_empty() {
            return None;
        }
        Some(Finding {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            resolution_type: self.resolution_type,
            severity: self.severity,
            properties: self.properties.clone(),
            supersedes: self.supersedes.clone(),
            occurrences,
        })
    }

    /// Single occurrence on the rule's own file with its own resolution.
    pub fn single_finding(&self) -> Finding {
        Finding {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            resolution_type: self.resolution_type,
            severity: self.severity,
            properties: self.properties.clone(),
            supersedes: self.supersedes.clone(),
            occurrences: vec![Occurrence::new(self.file.clone(), self.resolution.clone())],
        }
    }
}

/// One compatibility check.
///
/// `visit` must be a pure function of the project and the findings collected
/// before it; problems reading or parsing files mean "nothing to report".
pub trait Rule: Send + Sync {
    fn info(&self) -> &RuleInfo;

    fn visit(&self, project: &Project, prior: &[Finding]) -> Vec<Finding>;

    fn id(&self) -> &str {
        &self.info().id
    }
}

/// Whether `prior` already holds a finding for `id` whose boolean `key`
/// property is the opposite of `value`. Toggle rules (add/remove) use it to
/// avoid contradicting an earlier finding of the same rule.
pub fn has_opposite_toggle(prior: &[Finding], id: &str, key: &str, value: bool) -> bool {
    prior.iter().any(|f| {
        f.id == id && f.properties.get(key).and_then(Value::as_bool) == Some(!value)
    })
}
