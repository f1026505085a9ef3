//! Structural helpers shared by the syntax-tree rules.
//!
//! Imports are pulled with a tree-sitter query; call-site lookups work on the
//! flattened node list of a [`SourceFile`].

use tree_sitter::{Node, Query, QueryCursor, StreamingIterator};

use crate::project::source::{SourceFile, SyntaxNode};
use crate::rules::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportName {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportName {
    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {}", self.name, alias),
            None => self.name.clone(),
        }
    }
}

/// One `import ... from '<module>'` statement.
#[derive(Debug, Clone)]
pub struct ImportDecl {
    pub module: String,
    pub quote: char,
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub named: Vec<ImportName>,
    pub text: String,
    pub position: Position,
}

impl ImportDecl {
    /// Renders an import of `named` (plus this declaration's default and
    /// namespace bindings when `keep_other_bindings`) from `module`. `None`
    /// when there is nothing left to import.
    pub fn render_with(&self, module: &str, named: &[ImportName], keep_other_bindings: bool) -> Option<String> {
        let mut clause: Vec<String> = Vec::new();
        if keep_other_bindings {
            if let Some(default) = &self.default {
                clause.push(default.clone());
            }
            if let Some(ns) = &self.namespace {
                clause.push(format!("* as {}", ns));
            }
        }
        if !named.is_empty() {
            let names: Vec<String> = named.iter().map(ImportName::render).collect();
            clause.push(format!("{{ {} }}", names.join(", ")));
        }
        if clause.is_empty() {
            return None;
        }
        Some(format!(
            "import {} from {q}{}{q};",
            clause.join(", "),
            module,
            q = self.quote
        ))
    }
}

fn position_of(node: Node) -> Position {
    Position {
        line: node.start_position().row + 1,
        character: node.start_position().column,
    }
}

/// Position of a flattened node.
pub fn node_position(node: &SyntaxNode) -> Position {
    Position {
        line: node.start.0 + 1,
        character: node.start.1,
    }
}

/// Import declarations of `file` in source order. Empty when the file is
/// missing or does not parse.
pub fn imports(file: &SourceFile) -> Vec<ImportDecl> {
    let mut result = Vec::new();
    let (Some(tree), Some(text), Some(language)) = (file.tree(), file.text(), file.language()) else {
        return result;
    };

    let query = match Query::new(&language, "(import_statement source: (string) @source) @import") {
        Ok(q) => q,
        Err(_) => return result,
    };
    let import_idx = query.capture_index_for_name("import").unwrap_or(0);
    let bytes = text.as_bytes();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);

    while let Some(m) = matches.next() {
        for capture in m.captures {
            if capture.index != import_idx {
                continue;
            }
            if let Some(decl) = read_import(capture.node, bytes) {
                result.push(decl);
            }
        }
    }

    result
}

fn read_import(node: Node, bytes: &[u8]) -> Option<ImportDecl> {
    let source = node.child_by_field_name("source")?;
    let raw = source.utf8_text(bytes).ok()?;
    let quote = raw.chars().next().filter(|c| *c == '\'' || *c == '"').unwrap_or('\'');
    let module = raw.trim_matches(|c| c == '\'' || c == '"').to_string();

    let mut decl = ImportDecl {
        module,
        quote,
        default: None,
        namespace: None,
        named: Vec::new(),
        text: node.utf8_text(bytes).ok()?.to_string(),
        position: position_of(node),
    };

    let mut cursor = node.walk();
    let clause = node.named_children(&mut cursor).find(|c| c.kind() == "import_clause");
    let Some(clause) = clause else {
        // side-effect import: `import './styles.scss';`
        return Some(decl);
    };

    let mut clause_cursor = clause.walk();
    for part in clause.named_children(&mut clause_cursor) {
        match part.kind() {
            "identifier" => decl.default = part.utf8_text(bytes).ok().map(str::to_string),
            "namespace_import" => {
                let mut ns_cursor = part.walk();
                decl.namespace = part
                    .named_children(&mut ns_cursor)
                    .find(|c| c.kind() == "identifier")
                    .and_then(|c| c.utf8_text(bytes).ok())
                    .map(str::to_string);
            }
            "named_imports" => {
                let mut spec_cursor = part.walk();
                for spec in part.named_children(&mut spec_cursor) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name").and_then(|n| n.utf8_text(bytes).ok()) else {
                        continue;
                    };
                    let alias = spec
                        .child_by_field_name("alias")
                        .and_then(|n| n.utf8_text(bytes).ok())
                        .map(str::to_string);
                    let entry = ImportName { name: name.to_string(), alias };
                    if !decl.named.contains(&entry) {
                        decl.named.push(entry);
                    }
                }
            }
            _ => {}
        }
    }

    Some(decl)
}

/// Indices of `property_identifier` nodes named `property` that are the
/// property of a member expression (`x.<property>`).
pub fn property_accesses(file: &SourceFile, property: &str) -> Vec<usize> {
    let Some(nodes) = file.nodes() else {
        return Vec::new();
    };
    nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.kind == "property_identifier" && n.field == Some("property"))
        .filter(|(_, n)| file.node_text(n) == property)
        .filter(|(_, n)| n.parent.map(|p| nodes[p].kind == "member_expression").unwrap_or(false))
        .map(|(i, _)| i)
        .collect()
}

/// The call expression invoking the member expression that owns `index`,
/// e.g. the `getClient()` call for the `getClient` property identifier.
/// `None` when the access is not in callee position.
pub fn enclosing_call(nodes: &[SyntaxNode], index: usize) -> Option<usize> {
    let member = nodes[index].parent?;
    if nodes[member].kind != "member_expression" || nodes[index].field != Some("property") {
        return None;
    }
    let call = nodes[member].parent?;
    (nodes[call].kind == "call_expression" && nodes[member].field == Some("function")).then_some(call)
}

/// Named argument nodes of a call expression, in order.
pub fn call_arguments(nodes: &[SyntaxNode], call: usize) -> Vec<usize> {
    nodes[call]
        .children
        .iter()
        .copied()
        .find(|&c| nodes[c].field == Some("arguments"))
        .map(|args| {
            nodes[args]
                .children
                .iter()
                .copied()
                .filter(|&c| nodes[c].named && nodes[c].kind != "comment")
                .collect()
        })
        .unwrap_or_default()
}

/// Text of the member expression chain that owns property `index`
/// (`this.context.msGraphClientFactory.getClient`).
pub fn member_chain<'a>(file: &'a SourceFile, nodes: &[SyntaxNode], index: usize) -> &'a str {
    match nodes[index].parent {
        Some(parent) if nodes[parent].kind == "member_expression" => file.node_text(&nodes[parent]),
        _ => file.node_text(&nodes[index]),
    }
}

/// Name of the object a member access is made on: the last property of a
/// nested member expression (`msGraphClientFactory` in
/// `this.context.msGraphClientFactory?.getClient`), otherwise the object's text.
pub fn member_receiver<'a>(file: &'a SourceFile, nodes: &[SyntaxNode], index: usize) -> Option<&'a str> {
    let member = nodes[index].parent.filter(|&p| nodes[p].kind == "member_expression")?;
    let object = child_by_field(nodes, member, "object")?;
    if nodes[object].kind == "member_expression" {
        let property = child_by_field(nodes, object, "property")?;
        return Some(file.node_text(&nodes[property]));
    }
    Some(file.node_text(&nodes[object]))
}

fn child_by_field(nodes: &[SyntaxNode], parent: usize, field: &str) -> Option<usize> {
    nodes[parent].children.iter().copied().find(|&c| nodes[c].field == Some(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::FileSystem;
    use crate::fs::testing::MemoryFs;
    use std::sync::Arc;

    fn ts(content: &str) -> SourceFile {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFs::new().with_file("/p/src/a.ts", content));
        SourceFile::new(fs, "/p/src/a.ts")
    }

    #[test]
    fn test_imports_reads_all_binding_kinds() {
        let file = ts(r#"import * as React from "react";
import Def, { A, B as Bee } from '@fluentui/react';
import './styles.scss';
"#);
        let decls = imports(&file);
        assert_eq!(decls.len(), 3);

        assert_eq!(decls[0].module, "react");
        assert_eq!(decls[0].quote, '"');
        assert_eq!(decls[0].namespace.as_deref(), Some("React"));

        assert_eq!(decls[1].default.as_deref(), Some("Def"));
        assert_eq!(decls[1].named.len(), 2);
        assert_eq!(decls[1].named[1].alias.as_deref(), Some("Bee"));
        assert_eq!(decls[1].position.line, 2);

        assert!(decls[2].named.is_empty());
        assert!(decls[2].default.is_none());
    }

    #[test]
    fn test_imports_of_malformed_file_is_empty() {
        let file = ts("import { A from 'x'");
        assert!(imports(&file).is_empty());
    }

    #[test]
    fn test_render_with_keeps_quote_and_order() {
        let file = ts("import Def, { A, B } from \"old\";");
        let decl = &imports(&file)[0];
        let named = vec![ImportName { name: "B".into(), alias: None }];
        assert_eq!(
            decl.render_with("new", &named, true).as_deref(),
            Some("import Def, { B } from \"new\";")
        );
        assert_eq!(decl.render_with("new", &[], false), None);
    }

    #[test]
    fn test_enclosing_call_and_arguments() {
        let file = ts("this.context.msGraphClientFactory.getClient('3').then(c => c);\nconst f = x.getClient;");
        let nodes = file.nodes().unwrap();
        let accesses = property_accesses(&file, "getClient");
        assert_eq!(accesses.len(), 2);

        let call = enclosing_call(nodes, accesses[0]).expect("first access is a call");
        let args = call_arguments(nodes, call);
        assert_eq!(args.len(), 1);
        assert_eq!(file.node_text(&nodes[args[0]]), "'3'");
        assert_eq!(
            member_chain(&file, nodes, accesses[0]),
            "this.context.msGraphClientFactory.getClient"
        );

        assert!(enclosing_call(nodes, accesses[1]).is_none());
    }

    #[test]
    fn test_member_receiver_ignores_layout_and_optional_chaining() {
        let file = ts("this.context.msGraphClientFactory\n  ?.getClient();\nReactDom.render(el);");
        let nodes = file.nodes().unwrap();

        let get_client = property_accesses(&file, "getClient");
        assert_eq!(member_receiver(&file, nodes, get_client[0]), Some("msGraphClientFactory"));

        let render = property_accesses(&file, "render");
        assert_eq!(member_receiver(&file, nodes, render[0]), Some("ReactDom"));
    }
}
