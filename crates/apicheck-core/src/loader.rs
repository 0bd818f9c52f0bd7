//! Test file discovery

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Suffixes of test definition files.
pub const TEST_FILE_SUFFIXES: &[&str] = &[".ac.json", ".ac.yaml", ".ac.yml"];

/// `true` for `users.ac.json`, `false` for the bare `.ac.json` config file.
#[must_use]
pub fn is_test_definition(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    TEST_FILE_SUFFIXES
        .iter()
        .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
}

/// Find every test definition file in `dir` or below, sorted by path.
///
/// Entries that cannot be read are logged and skipped so one bad directory
/// does not hide the rest of the tree.
///
/// # Errors
///
/// Returns error only if `dir` itself cannot be read.
pub fn find_test_definitions(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    tracing::debug!(dir = %dir.display(), "searching for test definitions");
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_test_definition(entry.path()) {
            tracing::debug!(path = %entry.path().display(), "found test definition");
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
