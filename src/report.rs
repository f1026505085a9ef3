//! Renders a finding list for people (text, Markdown) and tools (JSON, TSV).

use serde::Serialize;

use crate::rules::{Finding, ResolutionType, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Text,
    Md,
    Tsv,
}

impl ReportFormat {
    pub fn parse(format: &str) -> Option<Self> {
        match format.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "text" | "txt" => Some(ReportFormat::Text),
            "md" | "markdown" => Some(ReportFormat::Md),
            "tsv" => Some(ReportFormat::Tsv),
            _ => None,
        }
    }
}

/// What was analyzed, printed in report headers.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub project: String,
    pub from: String,
    pub to: String,
    pub generated: String,
}

impl ReportMeta {
    pub fn new(project: &str, from: &str, to: &str) -> Self {
        Self {
            project: project.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            generated: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

pub fn render(findings: &[Finding], format: ReportFormat, meta: &ReportMeta) -> String {
    match format {
        ReportFormat::Json => render_json(findings),
        ReportFormat::Text => render_text(findings),
        ReportFormat::Md => render_markdown(findings, meta),
        ReportFormat::Tsv => render_tsv(findings),
    }
}

pub fn render_json(findings: &[Finding]) -> String {
    serde_json::to_string_pretty(findings).unwrap_or_default()
}

pub fn render_text(findings: &[Finding]) -> String {
    let mut out = String::new();
    for f in findings {
        out.push_str(&format!("{} {} ({})\n", f.id, f.title, f.severity.as_str()));
        if !f.description.is_empty() {
            out.push_str(&format!("  {}\n", f.description));
        }
        for o in &f.occurrences {
            match o.position {
                Some(p) => out.push_str(&format!("  {}:{}:{}\n", o.file, p.line, p.character)),
                None => out.push_str(&format!("  {}\n", o.file)),
            }
            for line in o.resolution.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        }
        out.push('\n');
    }
    out
}

/// `npm` commands of all findings merged per section, so the upgrade can
/// be run as a handful of commands.
fn merged_commands(findings: &[Finding]) -> Vec<String> {
    let mut commands: Vec<(String, Vec<String>)> = Vec::new();
    for f in findings {
        for o in &f.occurrences {
            let mut words = o.resolution.split_whitespace();
            let (Some("npm"), Some(verb), Some(flag)) = (words.next(), words.next(), words.next()) else {
                continue;
            };
            let prefix = format!("npm {} {}", verb, flag);
            let packages: Vec<String> = words.map(str::to_string).collect();
            match commands.iter_mut().find(|(p, _)| *p == prefix) {
                Some((_, existing)) => existing.extend(packages),
                None => commands.push((prefix, packages)),
            }
        }
    }
    commands
        .into_iter()
        .map(|(prefix, packages)| format!("{} {}", prefix, packages.join(" ")))
        .collect()
}

pub fn render_markdown(findings: &[Finding], meta: &ReportMeta) -> String {
    let mut out = format!(
        "# Upgrade project {} to v{}\n\nDate: {}\n\n",
        meta.project, meta.to, meta.generated
    );

    if findings.is_empty() {
        out.push_str(&format!("Project is compatible with v{}.\n", meta.to));
        return out;
    }

    out.push_str(&format!(
        "## Findings\n\nFollowing is the list of steps required to upgrade your project from v{} to v{}.\n\n",
        meta.from, meta.to
    ));
    out.push_str("| Id | Severity | File | Description |\n|---|---|---|---|\n");
    for f in findings {
        let files: Vec<&str> = f.occurrences.iter().map(|o| o.file.as_str()).collect();
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            f.id,
            f.severity.as_str(),
            files.join("<br>"),
            f.description.replace('|', "\\|")
        ));
    }

    let commands = merged_commands(findings);
    if !commands.is_empty() {
        out.push_str("\n## Summary\n\n### Execute script\n\n```sh\n");
        for c in &commands {
            out.push_str(c);
            out.push('\n');
        }
        out.push_str("```\n");
    }

    for f in findings.iter().filter(|f| f.resolution_type != ResolutionType::Cmd) {
        out.push_str(&format!("\n### {} {}\n\n{}\n", f.id, f.title, f.description));
        for o in &f.occurrences {
            out.push_str(&format!("\nIn file [{}]({}):\n\n", o.file, o.file));
            out.push_str(&format!("```{}\n{}\n```\n", f.resolution_type.as_str(), o.resolution));
        }
    }
    out
}

pub fn render_tsv(findings: &[Finding]) -> String {
    let mut out = String::from("id\ttitle\tdescription\tposition\tseverity\tfile\tresolution\n");
    for f in findings {
        for o in &f.occurrences {
            let position = o
                .position
                .map(|p| format!("{}:{}", p.line, p.character))
                .unwrap_or_default();
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
                f.id,
                f.title,
                f.description,
                position,
                f.severity.as_str(),
                o.file,
                o.resolution.replace('\t', " ").replace('\n', "\\n")
            ));
        }
    }
    out
}

/// Number of findings per severity: (required, recommended, optional).
pub fn severity_counts(findings: &[Finding]) -> (usize, usize, usize) {
    findings.iter().fold((0, 0, 0), |(r, rec, o), f| match f.severity {
        Severity::Required => (r + 1, rec, o),
        Severity::Recommended => (r, rec + 1, o),
        Severity::Optional => (r, rec, o + 1),
    })
}
