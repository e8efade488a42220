//! JavaScript front end built on tree-sitter.
//!
//! tree-sitter keeps comments as sibling nodes of the statements they sit
//! above. Every comment between two top-level statements is attached to the
//! following statement; comments after the last statement belong to nothing
//! and are dropped.

use crate::error::{HmDocError, Result};
use crate::model::{Comment, Statement, SyntaxTree};
use log::debug;
use std::path::Path;
use tree_sitter::{Node, Parser};

pub fn parse(path: &Path, source: &str) -> Result<SyntaxTree> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| HmDocError::NoSyntaxTree {
            path: path.to_path_buf(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        let at = first_error(root).unwrap_or(root).start_position();
        return Err(HmDocError::MalformedSource {
            path: path.to_path_buf(),
            line: at.row + 1,
            column: at.column + 1,
        });
    }

    let syntax = collect_statements(root, source);
    debug!(
        "parsed {}: {} top-level statement(s)",
        path.display(),
        syntax.statements.len()
    );
    Ok(syntax)
}

fn collect_statements(root: Node<'_>, source: &str) -> SyntaxTree {
    let mut statements = Vec::new();
    let mut pending: Vec<Comment> = Vec::new();

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "comment" => pending.extend(to_comment(&source[child.byte_range()])),
            "hash_bang_line" => {}
            _ => statements.push(Statement {
                leading_comments: std::mem::take(&mut pending),
            }),
        }
    }

    SyntaxTree { statements }
}

/// Strip the delimiters from a raw comment.
fn to_comment(raw: &str) -> Option<Comment> {
    if let Some(text) = raw.strip_prefix("//") {
        return Some(Comment::line(text));
    }
    let body = raw.strip_prefix("/*")?;
    Some(Comment::block(body.strip_suffix("*/").unwrap_or(body)))
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
