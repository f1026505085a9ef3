//! In-memory model of the analyzed project.
//!
//! The loader walks the root once and classifies files; content is only read
//! when a rule asks for it (see [`source`]).

pub mod source;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::fs::{self, FileSystem};
use source::{JsonFile, SourceFile, StyleFile, TextFile};

pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];
pub const MANIFEST_SUFFIX: &str = ".manifest.json";

/// A component manifest (`src/**/<Name>.manifest.json`).
pub struct Manifest {
    pub id: String,
    /// `WebPart`, `Extension` or `Library`; extensions carry their
    /// `extensionType` as `Extension/ApplicationCustomizer`.
    pub component_type: String,
    /// Containing folder, relative to the project root.
    pub folder: String,
    pub file: JsonFile,
}

pub struct Project {
    pub root: PathBuf,
    fs: Arc<dyn FileSystem>,
    pub package_json: Option<JsonFile>,
    pub yo_rc_json: Option<JsonFile>,
    pub tsconfig_json: Option<JsonFile>,
    pub package_solution_json: Option<JsonFile>,
    pub serve_json: Option<JsonFile>,
    pub gitignore: Option<TextFile>,
    pub npmignore: Option<TextFile>,
    pub eslintrc: Option<TextFile>,
    pub manifests: Vec<Manifest>,
    pub source_files: Vec<SourceFile>,
    pub style_files: Vec<StyleFile>,
}

impl Project {
    /// Walks `root` and builds the model. Never fails: a missing root gives an
    /// empty project.
    pub fn load(fs: Arc<dyn FileSystem>, root: &Path, skip_dirs: &[String]) -> Self {
        let mut project = Self {
            root: root.to_path_buf(),
            fs: fs.clone(),
            package_json: None,
            yo_rc_json: None,
            tsconfig_json: None,
            package_solution_json: None,
            serve_json: None,
            gitignore: None,
            npmignore: None,
            eslintrc: None,
            manifests: Vec::new(),
            source_files: Vec::new(),
            style_files: Vec::new(),
        };

        project.package_json = project.json_if_exists("package.json");
        project.yo_rc_json = project.json_if_exists(".yo-rc.json");
        project.tsconfig_json = project.json_if_exists("tsconfig.json");
        project.package_solution_json = project.json_if_exists("config/package-solution.json");
        project.serve_json = project.json_if_exists("config/serve.json");
        project.gitignore = project.text_if_exists(".gitignore");
        project.npmignore = project.text_if_exists(".npmignore");
        project.eslintrc = project.text_if_exists(".eslintrc.js");

        let src = root.join("src");
        for path in fs.walk(root, skip_dirs) {
            if !path.starts_with(&src) {
                continue;
            }
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_string();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_string();

            if name.ends_with(MANIFEST_SUFFIX) {
                if let Some(manifest) = project.read_manifest(path) {
                    project.manifests.push(manifest);
                }
            } else if ext == "scss" {
                project.style_files.push(StyleFile::new(fs.clone(), path));
            } else if SOURCE_EXTENSIONS.contains(&ext.as_str()) && !name.ends_with(".d.ts") {
                project.source_files.push(SourceFile::new(fs.clone(), path));
            }
        }

        debug!(
            root = %root.display(),
            manifests = project.manifests.len(),
            sources = project.source_files.len(),
            styles = project.style_files.len(),
            "project loaded"
        );

        project
    }

    fn json_if_exists(&self, rel: &str) -> Option<JsonFile> {
        let file = JsonFile::new(self.fs.clone(), self.root.join(rel));
        file.exists().then_some(file)
    }

    fn text_if_exists(&self, rel: &str) -> Option<TextFile> {
        let file = TextFile::new(self.fs.clone(), self.root.join(rel));
        file.exists().then_some(file)
    }

    fn read_manifest(&self, path: PathBuf) -> Option<Manifest> {
        let folder = path
            .parent()
            .map(|p| fs::relative_path(&self.root, p))
            .unwrap_or_default();
        let file = JsonFile::new(self.fs.clone(), path);
        let value = file.parsed()?;

        let id = value.get("id")?.as_str()?.to_string();
        let component_type = value.get("componentType")?.as_str()?;
        let component_type = match value.get("extensionType").and_then(|v| v.as_str()) {
            Some(ext) if component_type == "Extension" => format!("Extension/{}", ext),
            _ => component_type.to_string(),
        };

        Some(Manifest {
            id,
            component_type,
            folder,
            file,
        })
    }

    /// Path relative to the project root with `/` separators.
    pub fn relative(&self, path: &Path) -> String {
        fs::relative_path(&self.root, path)
    }

    /// Whether `rel` (relative to the root) exists on disk.
    pub fn file_exists(&self, rel: &str) -> bool {
        self.fs.exists(&self.root.join(rel))
    }

    /// Framework version the project was generated with: `.yo-rc.json` first,
    /// then the `@microsoft/sp-core-library` dependency.
    pub fn detect_version(&self) -> Option<String> {
        let from_yo = self
            .yo_rc_json
            .as_ref()
            .and_then(|f| f.parsed())
            .and_then(|v| v.get("@microsoft/generator-sharepoint"))
            .and_then(|v| v.get("version"))
            .and_then(|v| v.as_str());
        if let Some(version) = from_yo {
            return Some(version.to_string());
        }

        self.dependency_version("@microsoft/sp-core-library")
            .map(|v| v.trim_start_matches(['^', '~']).to_string())
    }

    /// Declared version range of `package` in `dependencies` or
    /// `devDependencies`.
    pub fn dependency_version(&self, package: &str) -> Option<&str> {
        let manifest = self.package_json.as_ref()?.parsed()?;
        ["dependencies", "devDependencies"]
            .iter()
            .find_map(|section| manifest.get(section)?.get(package)?.as_str())
    }
}
