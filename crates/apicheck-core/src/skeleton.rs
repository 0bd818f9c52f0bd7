//! Skeleton test file generation

use std::path::PathBuf;

use crate::definition::{ApiTest, Expectation};

/// Extension appended to generated files.
pub const EXTENSION: &str = ".ac.json";

#[derive(Debug, thiserror::Error)]
pub enum SkeletonError {
    #[error("filename cannot be empty")]
    EmptyName,
    #[error("cannot create template file as file {} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error("unable to write skeleton file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to serialize skeleton: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The single test written into a new skeleton file.
#[must_use]
pub fn skeleton() -> ApiTest {
    ApiTest {
        description: "Test Description".to_string(),
        method: "GET".to_string(),
        hostname: "http://localhost".to_string(),
        endpoint: "/".to_string(),
        request: Default::default(),
        response: Expectation::status(200),
    }
}

/// Pretty-printed JSON array holding [`skeleton`].
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn skeleton_json() -> Result<String, SkeletonError> {
    Ok(serde_json::to_string_pretty(&[skeleton()])?)
}

/// Write a skeleton file named `prefix`, appending `.ac.json` if missing.
///
/// Never overwrites an existing file. Returns the path written.
///
/// # Errors
///
/// Returns error if `prefix` is empty, the file exists, or writing fails.
pub fn create_skeleton_file(prefix: &str) -> Result<PathBuf, SkeletonError> {
    if prefix.is_empty() {
        return Err(SkeletonError::EmptyName);
    }

    let path = if prefix.ends_with(EXTENSION) {
        PathBuf::from(prefix)
    } else {
        PathBuf::from(format!("{prefix}{EXTENSION}"))
    };

    if path.exists() {
        return Err(SkeletonError::AlreadyExists(path));
    }

    let contents = skeleton_json()?;
    if let Err(source) = std::fs::write(&path, contents) {
        return Err(SkeletonError::Write { path, source });
    }
    Ok(path)
}
