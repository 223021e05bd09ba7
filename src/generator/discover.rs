//! Test-data discovery
//!
//! Discovery is a pure traversal: it walks the test-data tree depth-first
//! in sorted directory-listing order and returns the eligible source units
//! as an ordered sequence. Classification, compilation and emission are
//! sequential consumers of that sequence, which keeps the walk testable
//! without a compiler.
//!
//! A file is eligible when its text contains the entry-point marker;
//! everything else is an inert fixture that is visited (for directory
//! recursion) but produces no test. Entries named in the excluded set are
//! skipped before any other handling, directories included.

use std::fs;
use std::path::{Path, PathBuf};

use super::classify::SpecialFiles;
use super::errors::{GeneratorError, GeneratorResult};

/// One candidate source file: absolute-ish path, base name, raw text.
///
/// Immutable after discovery; consumed once by the generation pipeline.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub file_name: String,
    pub text: String,
}

/// Walk `root` and collect every eligible source unit.
///
/// Fails if the root cannot be listed or is empty; subdirectory listing
/// failures are fatal too. A run over an unchanged tree always yields the
/// same sequence.
pub fn discover(root: &Path, special: &SpecialFiles, marker: &str) -> GeneratorResult<Vec<SourceUnit>> {
    if !root.is_dir() {
        return Err(GeneratorError::Discovery {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let mut units = Vec::new();
    let entry_count = walk(root, special, marker, &mut units)?;

    if entry_count == 0 {
        return Err(GeneratorError::Discovery {
            path: root.to_path_buf(),
            reason: "test data directory is empty".to_string(),
        });
    }

    Ok(units)
}

/// Recurse into one directory, appending eligible units. Returns the
/// number of entries listed (before exclusion), so the caller can reject
/// an empty root.
fn walk(dir: &Path, special: &SpecialFiles, marker: &str, units: &mut Vec<SourceUnit>) -> GeneratorResult<usize> {
    let read = fs::read_dir(dir).map_err(|e| GeneratorError::Discovery {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| GeneratorError::Discovery {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        entries.push(entry.path());
    }
    // Stable walk order: directory-listing order is not guaranteed by the
    // OS, so sort by name.
    entries.sort();
    let entry_count = entries.len();

    for path in entries {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if special.is_excluded(name) {
            continue;
        }

        if path.is_dir() {
            walk(&path, special, marker, units)?;
        } else {
            let bytes = fs::read(&path).map_err(|source| GeneratorError::Read {
                path: path.clone(),
                source,
            })?;
            // Lossy decode: a stray binary fixture cannot contain the
            // marker and must not abort the walk.
            let text = String::from_utf8_lossy(&bytes).into_owned();
            if text.contains(marker) {
                units.push(SourceUnit {
                    file_name: name.to_string(),
                    path,
                    text,
                });
            }
        }
    }

    Ok(entry_count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const MARKER: &str = "fun box()";

    fn temp_tree(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("suitegen_discover_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_only_marked_files_are_eligible() {
        let root = temp_tree("marked");
        fs::write(root.join("a.kt"), "fun box() = \"OK\"").unwrap();
        fs::write(root.join("helper.kt"), "fun helper() = 1").unwrap();

        let units = discover(&root, &SpecialFiles::default(), MARKER).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].file_name, "a.kt");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_recurses_into_subdirectories_in_sorted_order() {
        let root = temp_tree("sorted");
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/two.kt"), "fun box() = \"OK\"").unwrap();
        fs::write(root.join("a/one.kt"), "fun box() = \"OK\"").unwrap();

        let units = discover(&root, &SpecialFiles::default(), MARKER).unwrap();
        let names: Vec<_> = units.iter().map(|u| u.file_name.as_str()).collect();
        assert_eq!(names, ["one.kt", "two.kt"]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_excluded_file_skipped_even_with_marker() {
        let root = temp_tree("excluded");
        fs::write(root.join("skipme.kt"), "fun box() = \"OK\"").unwrap();
        fs::write(root.join("keep.kt"), "fun box() = \"OK\"").unwrap();

        let special = SpecialFiles {
            excluded: HashSet::from(["skipme.kt".to_string()]),
            ..Default::default()
        };
        let units = discover(&root, &special, MARKER).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].file_name, "keep.kt");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_excluded_directory_not_entered() {
        let root = temp_tree("excluded_dir");
        fs::create_dir_all(root.join("broken")).unwrap();
        fs::write(root.join("broken/inner.kt"), "fun box() = \"OK\"").unwrap();
        fs::write(root.join("keep.kt"), "fun box() = \"OK\"").unwrap();

        let special = SpecialFiles {
            excluded: HashSet::from(["broken".to_string()]),
            ..Default::default()
        };
        let units = discover(&root, &special, MARKER).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].file_name, "keep.kt");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_binary_fixture_does_not_abort_the_walk() {
        let root = temp_tree("binary");
        fs::write(root.join("a.kt"), "fun box() = \"OK\"").unwrap();
        fs::write(root.join("image.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let units = discover(&root, &SpecialFiles::default(), MARKER).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].file_name, "a.kt");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_empty_root_is_an_error() {
        let root = temp_tree("empty");
        let err = discover(&root, &SpecialFiles::default(), MARKER).unwrap_err();
        assert!(matches!(err, GeneratorError::Discovery { .. }));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let root = std::env::temp_dir().join("suitegen_discover_does_not_exist");
        let err = discover(&root, &SpecialFiles::default(), MARKER).unwrap_err();
        assert!(matches!(err, GeneratorError::Discovery { .. }));
    }
}
