//! Data resolution errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying repository data.
///
/// All of them abort the build: a detail page cannot be emitted without its
/// record.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no entry with id `{id}`")]
    NotFound { id: String },

    #[error("repository id `{id}` appears more than once")]
    DuplicateId { id: String },

    #[error("`{first}` and `{second}` both resolve to `{path}`")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed repository data in `{0}`")]
    Malformed(PathBuf, #[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ResolveError::NotFound {
            id: "nonexistent-id".into(),
        };
        assert_eq!(err.to_string(), "no entry with id `nonexistent-id`");
    }

    #[test]
    fn test_duplicate_path_display() {
        let err = ResolveError::DuplicatePath {
            path: "projects/a-b".into(),
            first: "a-b".into(),
            second: "A B".into(),
        };
        let display = err.to_string();
        assert!(display.contains("projects/a-b"));
        assert!(display.contains("A B"));
    }
}
