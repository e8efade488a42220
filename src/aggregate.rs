//! File aggregation: per-file record lists → [`DocumentationSet`].

use crate::model::*;
use log::debug;
use std::collections::HashSet;

/// Build the documentation set for a batch.
///
/// Input order is preserved. A path seen twice keeps its first entry, and
/// files without accepted records are removed so that "nothing documented"
/// is never confused with "documented but empty".
pub fn aggregate<I>(results: I) -> DocumentationSet
where
    I: IntoIterator<Item = (String, Vec<AcceptedRecord>)>,
{
    let mut seen = HashSet::new();
    let mut files: Vec<FileRecords> = Vec::new();
    for (path, records) in results {
        if !seen.insert(path.clone()) {
            debug!("aggregate: duplicate path {}, keeping first", path);
            continue;
        }
        files.push(FileRecords { path, records });
    }

    files.retain(|f| !f.records.is_empty());
    DocumentationSet::from_files(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;

    fn record(line: &str) -> AcceptedRecord {
        let tree = SyntaxTree {
            statements: vec![Statement {
                leading_comments: vec![Comment::line(line)],
            }],
        };
        extract::extract(&tree)
            .into_iter()
            .next()
            .expect("fixture line must be a valid signature")
    }

    #[test]
    fn empty_files_are_absent() {
        let set = aggregate(vec![
            ("a.js".to_string(), vec![record("a :: Number")]),
            ("b.js".to_string(), vec![]),
            ("c.js".to_string(), vec![record("c :: String"), record("d :: a -> a")]),
        ]);
        assert_eq!(set.paths().collect::<Vec<_>>(), vec!["a.js", "c.js"]);
        assert!(!set.contains("b.js"));
        assert!(set.files().iter().all(|f| !f.records.is_empty()));
        assert_eq!(set.record_count(), 3);
    }

    #[test]
    fn keeps_discovery_order_and_first_duplicate() {
        let set = aggregate(vec![
            ("z.js".to_string(), vec![record("z :: a")]),
            ("a.js".to_string(), vec![record("first :: a")]),
            ("a.js".to_string(), vec![record("second :: a")]),
        ]);
        assert_eq!(set.paths().collect::<Vec<_>>(), vec!["z.js", "a.js"]);
        assert_eq!(set.get("a.js").unwrap()[0].name, "first");
    }

    #[test]
    fn serializes_as_object_keyed_by_path() {
        let set = aggregate(vec![("lib.js".to_string(), vec![record("f :: a -> b")])]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["lib.js"][0]["name"], "f");
        assert_eq!(json["lib.js"][0]["signature"], "a -> b");
        assert_eq!(json["lib.js"][0]["parsed"]["type"]["type"], "function");
    }

    #[test]
    fn large_batches_keep_first_entry_per_path() {
        let sig = record("f :: a");
        let mut input: Vec<(String, Vec<AcceptedRecord>)> = (0..5_000)
            .map(|i| (format!("src/{}.js", i), vec![sig.clone()]))
            .collect();
        input.push(("src/0.js".to_string(), vec![]));
        input.push(("src/4999.js".to_string(), vec![sig.clone(), sig.clone()]));

        let set = aggregate(input);
        assert_eq!(set.len(), 5_000);
        assert_eq!(set.paths().next(), Some("src/0.js"));
        assert_eq!(set.get("src/0.js").map(<[_]>::len), Some(1));
        assert_eq!(set.get("src/4999.js").map(<[_]>::len), Some(1));
        assert!(set.contains("src/2500.js"));
        assert!(!set.contains("src/5000.js"));
    }
}
