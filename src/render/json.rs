//! JSON renderer — the documentation set as an object keyed by file path.
//!
//! Useful for custom rendering pipelines.

use crate::error::Result;
use crate::model::DocumentationSet;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, set: &DocumentationSet) -> Result<String> {
        let mut out = serde_json::to_string_pretty(set)?;
        out.push('\n');
        Ok(out)
    }
}
