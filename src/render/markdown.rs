//! Markdown projection of accepted records.

use crate::error::Result;
use crate::model::*;
use crate::render::Renderer;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, set: &DocumentationSet) -> Result<String> {
        Ok(render_set(set))
    }
}

/// Render one record:
///
/// ```text
/// ## .name
/// `a -> b`
///
/// description, when there is one
/// ```
pub fn project(record: &AcceptedRecord) -> String {
    let mut out = format!("## .{}\n`{}`", record.name, record.signature);
    if let Some(desc) = record.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str("\n\n");
        out.push_str(desc);
    }
    out
}

/// Render one file: a `## path` heading followed by its records.
pub fn render_file(file: &FileRecords) -> String {
    let mut out = format!("## {}\n", file.path);
    for record in &file.records {
        out.push('\n');
        out.push_str(&project(record));
        out.push('\n');
    }
    out
}

/// Render every file of the set, separated by blank lines.
pub fn render_set(set: &DocumentationSet) -> String {
    set.files()
        .iter()
        .map(render_file)
        .collect::<Vec<_>>()
        .join("\n")
}
