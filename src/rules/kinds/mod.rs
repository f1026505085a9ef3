//! Reusable rule kinds. Each catalog entry is one of these, configured with
//! its own id, package, file or pattern.

pub mod call_argument;
pub mod dependency;
pub mod file_exists;
pub mod ignore_entry;
pub mod imports;
pub mod json_property;
pub mod lint_config;
pub mod manifest;
pub mod scss_import;
pub mod source_text;

pub use call_argument::CallArgumentRule;
pub use dependency::DependencyRule;
pub use file_exists::FileExistsRule;
pub use ignore_entry::IgnoreEntryRule;
pub use imports::{ImportRelocationRule, ImportRemovalRule};
pub use json_property::{ConfigFile, JsonCheck, JsonPropertyRule};
pub use lint_config::LintConfigRule;
pub use manifest::ManifestPropertyRule;
pub use scss_import::ScssImportRule;
pub use source_text::SourceTextRule;

use serde_json::{Map, Value};

/// Pretty JSON snippet placing `value` at `pointer`, e.g. `/solution/developer`
/// becomes `{ "solution": { "developer": <value> } }`.
pub fn json_snippet(pointer: &str, value: &Value) -> String {
    let mut current = value.clone();
    for segment in pointer.split('/').skip(1).collect::<Vec<_>>().into_iter().rev() {
        let key = segment.replace("~1", "/").replace("~0", "~");
        let mut map = Map::new();
        map.insert(key, current);
        current = Value::Object(map);
    }
    serde_json::to_string_pretty(&current).unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::fs::testing::MemoryFs;
    use crate::fs::{FileSystem, skip_dirs_with};
    use crate::project::Project;
    use std::path::Path;
    use std::sync::Arc;

    /// Loads a project rooted at `/p` from `(relative path, content)` pairs.
    pub fn project(files: &[(&str, &str)]) -> Project {
        let mut fs = MemoryFs::new();
        for (path, content) in files {
            fs = fs.with_file(Path::new("/p").join(path), content);
        }
        let fs: Arc<dyn FileSystem> = Arc::new(fs);
        Project::load(fs, Path::new("/p"), &skip_dirs_with(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_snippet_nests_pointer_segments() {
        let snippet = json_snippet("/@microsoft~1generator-sharepoint/version", &Value::from("1.15.0"));
        let parsed: Value = serde_json::from_str(&snippet).unwrap();
        assert_eq!(parsed["@microsoft/generator-sharepoint"]["version"], "1.15.0");
    }
}
