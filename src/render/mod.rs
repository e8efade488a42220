//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;
pub mod template;

use crate::error::{HmDocError, Result};
use crate::model::DocumentationSet;

/// Trait for rendering a DocumentationSet into a specific output format.
pub trait Renderer {
    fn render(&self, set: &DocumentationSet) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(HmDocError::UnknownFormat(format.to_string())),
    }
}
