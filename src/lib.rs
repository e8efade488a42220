//! hmdoc — Markdown API docs from Hindley-Milner signature comments.
//!
//! A documented JavaScript function carries a signature line and, optionally,
//! a description block directly above it:
//!
//! ```text
//! /*
//! Loads the contents of a URL.
//! */
//! // loadURL :: request -> url -> Promise
//! const loadURL = request => url => ...
//! ```
//!
//! [`batch::parse`] turns a set of files into a [`DocumentationSet`], which
//! the renderers in [`render`] turn into Markdown, JSON, or a user template.

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod signature;

pub use error::{HmDocError, Result};
pub use model::{AcceptedRecord, DocumentationSet};

use log::debug;
use std::fs;
use std::path::Path;

/// Parse one source file and extract its accepted records.
pub fn extract_source(path: &Path, source: &str) -> Result<Vec<AcceptedRecord>> {
    let tree = parser::parse_file(path, source)?;
    Ok(extract::extract(&tree))
}

/// Parse all files matched by `patterns` and render them into the template
/// at `template_path`.
///
/// Fails on the first file that cannot be read or parsed. The `hmdoc` binary
/// instead calls [`batch::parse`] itself, warns about failed files and
/// renders the rest through [`render_template_file`] (unless `--strict`).
pub fn get_markdown(patterns: &[String], template_path: &Path) -> Result<String> {
    let set = batch::parse(patterns)?.into_result()?;
    render_template_file(&set, template_path)
}

/// Render `set` into the template stored at `template_path`.
pub fn render_template_file(set: &DocumentationSet, template_path: &Path) -> Result<String> {
    let template =
        fs::read_to_string(template_path).map_err(|e| HmDocError::io(template_path, e))?;
    debug!(
        "rendering {} record(s) into {}",
        set.record_count(),
        template_path.display()
    );
    render::template::render(&template, set)
}

/// Like [`get_markdown`], then write the result to `output_path`.
pub fn write_markdown_file(
    patterns: &[String],
    template_path: &Path,
    output_path: &Path,
) -> Result<String> {
    let markdown = get_markdown(patterns, template_path)?;
    write_output(output_path, &markdown)
}

/// Write rendered output, returning the success message.
pub fn write_output(output_path: &Path, content: &str) -> Result<String> {
    fs::write(output_path, content).map_err(|e| HmDocError::io(output_path, e))?;
    Ok(format!(
        "Successfully wrote filename: {}",
        output_path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    const SOURCE: &str = indoc! {"
        /*
        Loads a URL.
        */
        // loadURL :: request -> url -> Promise
        const loadURL = request => url => request.get(url);

        // readFile :: fs -> filename -> encoding -> Promise
        const readFile = fs => filename => encoding => fs.readFile(filename, encoding);

        // this is a random comment
        const alwaysTrue = () => true;
    "};

    #[test]
    fn two_documented_statements_in_order() {
        let records = extract_source(Path::new("example.js"), SOURCE).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["loadURL", "readFile"]);
        assert_eq!(records[0].description.as_deref(), Some("\nLoads a URL.\n"));
    }

    #[test]
    fn writes_rendered_template() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("example.js");
        fs::write(&src, SOURCE).unwrap();
        let template = dir.path().join("README.tpl.md");
        fs::write(&template, "# Example\n\n{{#hmdoc}}{{/hmdoc}}\n").unwrap();
        let output = dir.path().join("README.md");

        let message = write_markdown_file(
            &[src.to_string_lossy().to_string()],
            &template,
            &output,
        )
        .unwrap();
        assert_eq!(
            message,
            format!("Successfully wrote filename: {}", output.display())
        );

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("# Example\n\n## "));
        assert!(written.contains("## .loadURL\n`request -> url -> Promise`\n\n\nLoads a URL.\n"));
        assert!(written.contains("## .readFile\n`fs -> filename -> encoding -> Promise`"));
        assert!(!written.contains("alwaysTrue"));
    }

    #[test]
    fn missing_template_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("example.js");
        fs::write(&src, SOURCE).unwrap();
        let err = get_markdown(
            &[src.to_string_lossy().to_string()],
            &dir.path().join("nope.md"),
        )
        .unwrap_err();
        assert!(matches!(err, HmDocError::Io { .. }));
    }

    #[test]
    fn get_markdown_fails_fast_where_batch_keeps_going() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("example.js");
        fs::write(&src, SOURCE).unwrap();
        let broken = dir.path().join("broken.js");
        fs::write(&broken, "const = ;\n").unwrap();
        let template = dir.path().join("README.tpl.md");
        fs::write(&template, "{{ hmdoc() }}").unwrap();
        let patterns = [
            src.to_string_lossy().to_string(),
            broken.to_string_lossy().to_string(),
        ];

        let err = get_markdown(&patterns, &template).unwrap_err();
        assert!(matches!(err, HmDocError::MalformedSource { .. }));

        let outcome = batch::parse(&patterns).unwrap();
        assert_eq!(outcome.failures.len(), 1);
        let partial = render_template_file(&outcome.documentation, &template).unwrap();
        assert!(partial.contains("## .loadURL"));

        let clean = get_markdown(&patterns[..1], &template).unwrap();
        assert_eq!(clean, partial);
    }
}
