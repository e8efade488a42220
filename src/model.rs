//! Data model for extracted documentation — format-agnostic.
//!
//! The syntax-tree types are the only shape the extraction pipeline reads
//! from a parsed source file. The record types follow the pipeline stages:
//! each stage consumes the previous record and produces a new one.

use crate::signature::{Signature, SignatureError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

// -- Syntax tree --------------------------------------------------------------

/// Top-level statements of one parsed source file, in source order.
#[derive(Debug, Default, Clone)]
pub struct SyntaxTree {
    pub statements: Vec<Statement>,
}

/// A top-level statement and the comments attached directly above it.
#[derive(Debug, Default, Clone)]
pub struct Statement {
    pub leading_comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A comment as reported by the parser. `text` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
}

impl Comment {
    pub fn line(text: impl Into<String>) -> Self {
        Comment {
            kind: CommentKind::Line,
            text: text.into(),
        }
    }

    pub fn block(text: impl Into<String>) -> Self {
        Comment {
            kind: CommentKind::Block,
            text: text.into(),
        }
    }
}

// -- Pipeline records ---------------------------------------------------------

/// Candidate signature and description picked from one statement's comments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawPair<'a> {
    pub signature: Option<&'a Comment>,
    pub description: Option<&'a Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    /// Line comment with `*` padding and whitespace trimmed; empty when the
    /// statement had no line comment.
    pub signature_text: String,
    /// Block comment text, verbatim.
    pub description_text: Option<String>,
}

#[derive(Debug)]
pub struct ParsedRecord {
    pub normalized: NormalizedRecord,
    pub parse_result: Result<Signature, SignatureError>,
}

#[derive(Debug)]
pub struct SignatureRecord {
    pub parsed: ParsedRecord,
    /// Text left of `::`, trimmed.
    pub display_name: String,
    /// Text right of `::`, trimmed. Empty when there is no delimiter.
    pub display_signature: String,
}

/// A validated documentation entry, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AcceptedRecord {
    pub name: String,
    pub signature: String,
    /// The full normalized signature line, e.g. `parse :: glob -> Promise`.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parsed: Signature,
}

// -- Documentation set --------------------------------------------------------

/// Accepted records of one file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileRecords {
    pub path: String,
    pub records: Vec<AcceptedRecord>,
}

/// File path → accepted records, in discovery order.
///
/// Built by [`crate::aggregate::aggregate`]; a file with no accepted records
/// is never present. Serializes as a JSON object keyed by path.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentationSet {
    files: Vec<FileRecords>,
    /// Path → position in `files`.
    index: HashMap<String, usize>,
}

impl DocumentationSet {
    /// Paths in `files` must be unique.
    pub(crate) fn from_files(files: Vec<FileRecords>) -> Self {
        let index = files
            .iter()
            .enumerate()
            .map(|(i, f)| (f.path.clone(), i))
            .collect();
        DocumentationSet { files, index }
    }

    pub fn get(&self, path: &str) -> Option<&[AcceptedRecord]> {
        self.index
            .get(path)
            .map(|&i| self.files[i].records.as_slice())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn files(&self) -> &[FileRecords] {
        &self.files
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of records across all files.
    pub fn record_count(&self) -> usize {
        self.files.iter().map(|f| f.records.len()).sum()
    }
}

impl Serialize for DocumentationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.files.len()))?;
        for file in &self.files {
            map.serialize_entry(&file.path, &file.records)?;
        }
        map.end()
    }
}
