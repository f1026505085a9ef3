//! Lazy, fault-tolerant wrappers around the files of a project.
//!
//! Nothing is read until a rule asks for it, every derived value is computed
//! once, and any I/O or parse failure turns into `None`.

use once_cell::sync::OnceCell;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tree_sitter::{Language, Parser, Tree};

use crate::fs::FileSystem;

/// Raw-text core shared by every file kind.
pub struct LazyFile {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
    exists: OnceCell<bool>,
    text: OnceCell<Option<String>>,
}

impl LazyFile {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fs,
            exists: OnceCell::new(),
            text: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        *self.exists.get_or_init(|| self.fs.exists(&self.path))
    }

    pub fn text(&self) -> Option<&str> {
        self.text
            .get_or_init(|| {
                if !self.exists() {
                    return None;
                }
                self.fs.read_text(&self.path).ok()
            })
            .as_deref()
    }
}

/// Plain text file, e.g. `.gitignore` or `.eslintrc.js`.
pub struct TextFile {
    inner: LazyFile,
}

impl TextFile {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self { inner: LazyFile::new(fs, path) }
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn exists(&self) -> bool {
        self.inner.exists()
    }

    pub fn text(&self) -> Option<&str> {
        self.inner.text()
    }

    /// Trimmed, non-empty, non-comment lines. Used for ignore files.
    pub fn entries(&self) -> Vec<&str> {
        self.text()
            .map(|t| {
                t.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Style sheet (`.scss`). Same capabilities as [`TextFile`].
pub struct StyleFile {
    inner: LazyFile,
}

impl StyleFile {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self { inner: LazyFile::new(fs, path) }
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn exists(&self) -> bool {
        self.inner.exists()
    }

    pub fn text(&self) -> Option<&str> {
        self.inner.text()
    }
}

/// Structured configuration file parsed into a JSON value.
///
/// Configuration files of this ecosystem routinely carry `//` and `/* */`
/// comments, so they are stripped before parsing.
pub struct JsonFile {
    inner: LazyFile,
    parsed: OnceCell<Option<Value>>,
}

impl JsonFile {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            inner: LazyFile::new(fs, path),
            parsed: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn exists(&self) -> bool {
        self.inner.exists()
    }

    pub fn text(&self) -> Option<&str> {
        self.inner.text()
    }

    pub fn parsed(&self) -> Option<&Value> {
        self.parsed
            .get_or_init(|| {
                let text = self.text()?;
                serde_json::from_str(&strip_json_comments(text)).ok()
            })
            .as_ref()
    }

    /// Value at a JSON pointer (`/compilerOptions/target`).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.parsed()?.pointer(pointer)
    }
}

/// Removes `//` line comments and `/* */` block comments outside of strings.
pub fn strip_json_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    // keep line structure for nicer serde errors
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// One node of the flattened syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: &'static str,
    /// Field name under which the parent holds this node (`function`, `source`, ...).
    pub field: Option<&'static str>,
    pub named: bool,
    pub start_byte: usize,
    pub end_byte: usize,
    /// 0-based row and column.
    pub start: (usize, usize),
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Grammar for a source path, by extension.
pub fn language_for(path: &Path) -> Option<Language> {
    match path.extension().and_then(|e| e.to_str())? {
        "ts" => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "js" | "jsx" => Some(tree_sitter_javascript::LANGUAGE.into()),
        _ => None,
    }
}

/// Parses `text`, treating both parser failure and error recovery as
/// "unparseable".
pub fn parse_source(language: &Language, text: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(language).ok()?;
    let tree = parser.parse(text, None)?;
    if tree.root_node().has_error() {
        return None;
    }
    Some(tree)
}

/// Pre-order flattening of `tree`; index 0 is the root.
pub fn flatten(tree: &Tree) -> Vec<SyntaxNode> {
    let mut nodes: Vec<SyntaxNode> = Vec::new();
    let mut cursor = tree.walk();
    let mut stack: Vec<usize> = Vec::new();

    loop {
        let node = cursor.node();
        let index = nodes.len();
        let parent = stack.last().copied();
        nodes.push(SyntaxNode {
            kind: node.kind(),
            field: cursor.field_name(),
            named: node.is_named(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start: (node.start_position().row, node.start_position().column),
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            nodes[p].children.push(index);
        }

        if cursor.goto_first_child() {
            stack.push(index);
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return nodes;
            }
            stack.pop();
        }
    }
}

/// TypeScript / JavaScript source backed by a tree-sitter tree.
pub struct SourceFile {
    inner: LazyFile,
    tree: OnceCell<Option<Tree>>,
    nodes: OnceCell<Option<Vec<SyntaxNode>>>,
}

impl SourceFile {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            inner: LazyFile::new(fs, path),
            tree: OnceCell::new(),
            nodes: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn exists(&self) -> bool {
        self.inner.exists()
    }

    pub fn text(&self) -> Option<&str> {
        self.inner.text()
    }

    pub fn language(&self) -> Option<Language> {
        language_for(self.path())
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree
            .get_or_init(|| {
                let text = self.text()?;
                let language = self.language()?;
                parse_source(&language, text)
            })
            .as_ref()
    }

    pub fn nodes(&self) -> Option<&[SyntaxNode]> {
        self.nodes
            .get_or_init(|| self.tree().map(flatten))
            .as_deref()
    }

    /// Source text covered by `node`.
    pub fn node_text(&self, node: &SyntaxNode) -> &str {
        self.text()
            .and_then(|t| t.get(node.start_byte..node.end_byte))
            .unwrap_or("")
    }
}
