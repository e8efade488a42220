//! Comment extraction pipeline — syntax tree in, accepted records out.
//!
//! Stages, in order:
//!
//! 1. **locate**: leading-comment groups of top-level statements
//! 2. **pair**: first line comment + first block comment of each group
//! 3. **normalize**: trim `*` padding and whitespace from the signature line
//! 4. **parse**: run the signature grammar, keeping the outcome
//! 5. **split**: derive display name / display signature around `::`
//! 6. **accept**: drop everything that is not a real signature
//!
//! Every stage is a plain function returning fresh values, so files can be
//! processed in parallel without coordination.

use crate::model::*;
use crate::signature::{self, Signature, SignatureError};
use log::debug;
use std::panic::{self, AssertUnwindSafe};

/// Delimiter between the documented name and its type.
pub const DELIMITER: &str = "::";

/// Run the full pipeline over one syntax tree.
pub fn extract(tree: &SyntaxTree) -> Vec<AcceptedRecord> {
    let groups = locate(tree);
    debug!("extract: {} commented statement(s)", groups.len());

    let records: Vec<SignatureRecord> = groups
        .into_iter()
        .map(pair)
        .map(normalize)
        .map(parse)
        .map(split)
        .collect();

    let accepted = accept(records);
    debug!("extract: {} accepted record(s)", accepted.len());
    accepted
}

// -- Comment locator ----------------------------------------------------------

/// Leading-comment groups of every top-level statement that has any.
pub fn locate(tree: &SyntaxTree) -> Vec<&[Comment]> {
    tree.statements
        .iter()
        .map(|stmt| stmt.leading_comments.as_slice())
        .filter(|comments| !comments.is_empty())
        .collect()
}

// -- Pair extractor -----------------------------------------------------------

/// Pick the candidate signature and description from one comment group.
///
/// The first line comment and the first block comment are chosen
/// independently, so a description block may come before or after its
/// signature line. Unrelated comments sitting above a statement can be
/// picked up as well; such false positives are usually discarded later
/// because they do not parse as signatures.
pub fn pair(comments: &[Comment]) -> RawPair<'_> {
    RawPair {
        signature: comments.iter().find(|c| c.kind == CommentKind::Line),
        description: comments.iter().find(|c| c.kind == CommentKind::Block),
    }
}

// -- Text normalizer ----------------------------------------------------------

/// Strip `*` padding and surrounding whitespace from a signature line.
pub fn normalize_signature_text(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == '*' || c.is_whitespace())
}

pub fn normalize(pair: RawPair<'_>) -> NormalizedRecord {
    NormalizedRecord {
        signature_text: pair
            .signature
            .map(|c| normalize_signature_text(&c.text).to_string())
            .unwrap_or_default(),
        description_text: pair.description.map(|c| c.text.clone()),
    }
}

// -- Signature parser adapter -------------------------------------------------

/// Run the signature grammar, converting any fault into a failed result.
pub fn parse_signature(text: &str) -> Result<Signature, SignatureError> {
    match panic::catch_unwind(AssertUnwindSafe(|| signature::parse(text))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(SignatureError::Internal(reason))
        }
    }
}

pub fn parse(normalized: NormalizedRecord) -> ParsedRecord {
    let parse_result = parse_signature(&normalized.signature_text);
    ParsedRecord {
        normalized,
        parse_result,
    }
}

// -- Display split ------------------------------------------------------------

pub fn split(parsed: ParsedRecord) -> SignatureRecord {
    let text = parsed.normalized.signature_text.as_str();
    let (display_name, display_signature) = match text.split_once(DELIMITER) {
        Some((name, rest)) => (name.trim().to_string(), rest.trim().to_string()),
        None => (text.to_string(), String::new()),
    };
    SignatureRecord {
        parsed,
        display_name,
        display_signature,
    }
}

// -- Legitimacy filter --------------------------------------------------------

fn has_signature_text(record: &SignatureRecord) -> bool {
    !record.parsed.normalized.signature_text.is_empty()
}

fn parsed_ok(record: &SignatureRecord) -> bool {
    record.parsed.parse_result.is_ok()
}

fn has_display_signature(record: &SignatureRecord) -> bool {
    !record.display_signature.is_empty()
}

/// Keep only records that look like genuine signature documentation.
/// Rejections are silent.
pub fn accept(records: Vec<SignatureRecord>) -> Vec<AcceptedRecord> {
    records
        .into_iter()
        .filter(has_signature_text)
        .filter(parsed_ok)
        .filter(has_display_signature)
        .filter_map(into_accepted)
        .collect()
}

fn into_accepted(record: SignatureRecord) -> Option<AcceptedRecord> {
    let SignatureRecord {
        parsed,
        display_name,
        display_signature,
    } = record;
    let signature = parsed.parse_result.ok()?;
    Some(AcceptedRecord {
        name: display_name,
        signature: display_signature,
        text: parsed.normalized.signature_text,
        description: parsed.normalized.description_text,
        parsed: signature,
    })
}
