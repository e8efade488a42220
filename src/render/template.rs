//! User templates rendered with minijinja.
//!
//! The template sees:
//!
//! - `files`: list of `{ path, records }` in discovery order
//! - `root`: the same data as an object keyed by path
//! - `hmdoc()`: the whole set rendered as Markdown
//!
//! Templates written for the handlebars block helper
//! (`{{#hmdoc}}{{/hmdoc}}`) are rewritten to `{{ hmdoc() }}` first.

use crate::error::Result;
use crate::model::{DocumentationSet, FileRecords};
use crate::render::markdown;
use minijinja::Environment;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::LazyLock;

static RE_LEGACY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*#\s*hmdoc\s*\}\}\s*\{\{\s*/\s*hmdoc\s*\}\}").unwrap()
});

#[derive(Serialize)]
struct TemplateContext<'a> {
    files: &'a [FileRecords],
    root: &'a DocumentationSet,
}

fn upgrade_legacy_markers(template: &str) -> Cow<'_, str> {
    RE_LEGACY_BLOCK.replace_all(template, "{{ hmdoc() }}")
}

/// Render `template` with the documentation set.
pub fn render(template: &str, set: &DocumentationSet) -> Result<String> {
    let source = upgrade_legacy_markers(template);
    let document = markdown::render_set(set);

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_function("hmdoc", move || document.clone());

    let ctx = TemplateContext {
        files: set.files(),
        root: set,
    };
    Ok(env.render_str(&source, ctx)?)
}
