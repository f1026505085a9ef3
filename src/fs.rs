//! File-system capability used by the project loader and every source file.
//!
//! All disk access of the analysis core goes through [`FileSystem`], so tests
//! can swap the real disk for an in-memory tree.

use std::io;
use std::path::{Path, PathBuf};

/// Directories never worth walking in a component project.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "lib",
    "dist",
    "temp",
    "release",
    "coverage",
    "target",
];

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Every regular file below `root`, sorted by path, skipping any directory
    /// whose name is in `skip_dirs`.
    fn walk(&self, root: &Path, skip_dirs: &[String]) -> Vec<PathBuf>;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn walk(&self, root: &Path, skip_dirs: &[String]) -> Vec<PathBuf> {
        if !root.is_dir() {
            return Vec::new();
        }

        let skip: Vec<String> = skip_dirs.to_vec();
        let walker = ignore::WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !skip.iter().any(|s| s == name))
                    .unwrap_or(true)
            })
            .build();

        let mut files = Vec::new();
        for result in walker {
            if let Ok(entry) = result {
                if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    files.push(entry.into_path());
                }
            }
        }
        files.sort();
        files
    }
}

/// Default skip list as owned strings, extended with `extra`.
pub fn skip_dirs_with(extra: &[String]) -> Vec<String> {
    let mut dirs: Vec<String> = DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect();
    for dir in extra {
        if !dirs.contains(dir) {
            dirs.push(dir.clone());
        }
    }
    dirs
}

/// Path of `path` relative to `root`, always with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
