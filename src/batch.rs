//! Batch driver: glob expansion, file reading, and parallel extraction.
//!
//! Files are independent, so they are processed with rayon. A file that
//! cannot be read or parsed is reported in [`BatchOutcome::failures`] and
//! does not affect the others.

use crate::aggregate::aggregate;
use crate::error::{HmDocError, Result};
use crate::model::{AcceptedRecord, DocumentationSet};
use crate::parser;
use log::{debug, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Pattern used when no input is given.
pub const DEFAULT_GLOB: &str = "./*.js";

/// A file that failed to read or parse.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: HmDocError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub documentation: DocumentationSet,
    pub failures: Vec<FileFailure>,
}

impl BatchOutcome {
    /// The documentation set, or the first file failure if any file failed.
    pub fn into_result(self) -> Result<DocumentationSet> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(self.documentation),
        }
    }
}

/// Files found by [`expand_globs`], plus the paths that could not be
/// traversed.
#[derive(Debug, Default)]
pub struct Expansion {
    pub files: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

/// Expand patterns, then read and extract every matched file.
pub fn parse(patterns: &[String]) -> Result<BatchOutcome> {
    let expansion = expand_globs(patterns)?;
    debug!("batch: {} file(s) to process", expansion.files.len());
    let mut outcome = parse_files(&expansion.files);
    if !expansion.failures.is_empty() {
        let mut failures = expansion.failures;
        failures.append(&mut outcome.failures);
        outcome.failures = failures;
    }
    Ok(outcome)
}

/// Read and extract the given files in parallel.
pub fn parse_files(files: &[PathBuf]) -> BatchOutcome {
    let results: Vec<(PathBuf, Result<_>)> = files
        .par_iter()
        .map(|path| (path.clone(), process_file(path)))
        .collect();

    let mut documented = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (path, result) in results {
        match result {
            Ok(records) => documented.push((path.to_string_lossy().to_string(), records)),
            Err(error) => failures.push(FileFailure { path, error }),
        }
    }

    BatchOutcome {
        documentation: aggregate(documented),
        failures,
    }
}

fn process_file(path: &Path) -> Result<Vec<AcceptedRecord>> {
    debug!("reading {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| HmDocError::io(path, e))?;
    crate::extract_source(path, &content)
}

fn traversal_failure(path: PathBuf, source: std::io::Error) -> FileFailure {
    debug!("cannot read {}: {}", path.display(), source);
    FileFailure {
        error: HmDocError::io(path.clone(), source),
        path,
    }
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
///
/// Only a malformed pattern is an error. Directories and glob matches that
/// cannot be read are collected in [`Expansion::failures`].
pub fn expand_globs(patterns: &[String]) -> Result<Expansion> {
    let mut expansion = Expansion::default();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            expansion.files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            scan_dir(path, &mut expansion);
            continue;
        }
        let paths = glob::glob(pattern).map_err(|source| HmDocError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        let mut matched = 0usize;
        for entry in paths {
            match entry {
                Ok(p) if p.is_file() => {
                    matched += 1;
                    expansion.files.push(p);
                }
                Ok(_) => {}
                Err(e) => {
                    let p = e.path().to_path_buf();
                    expansion.failures.push(traversal_failure(p, e.into_error()));
                }
            }
        }
        if matched == 0 {
            warn!("no files matched: {}", pattern);
        }
    }
    // Sort for deterministic output
    expansion.files.sort();
    expansion.files.dedup();
    Ok(expansion)
}

fn scan_dir(dir: &Path, expansion: &mut Expansion) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            expansion.failures.push(traversal_failure(dir.to_path_buf(), e));
            return;
        }
    };
    for entry in entries {
        match entry {
            Ok(entry) => {
                let p = entry.path();
                if p.is_file() && parser::is_supported(&p) {
                    expansion.files.push(p);
                }
            }
            Err(e) => expansion.failures.push(traversal_failure(dir.to_path_buf(), e)),
        }
    }
}
