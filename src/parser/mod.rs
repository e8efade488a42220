//! Parser module — dispatch by file extension.

pub mod javascript;

use crate::error::{HmDocError, Result};
use crate::model::SyntaxTree;
use std::path::Path;

/// File extensions recognized as source files.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Parse a source file into a SyntaxTree based on its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<SyntaxTree> {
    if is_supported(path) {
        javascript::parse(path, content)
    } else {
        Err(HmDocError::UnsupportedFile {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_extension() {
        assert!(parse_file(Path::new("a.js"), "1;").is_ok());
        assert!(parse_file(Path::new("a.mjs"), "export default 1;").is_ok());
        assert!(matches!(
            parse_file(Path::new("a.py"), "x = 1"),
            Err(HmDocError::UnsupportedFile { .. })
        ));
    }
}
