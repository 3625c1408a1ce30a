//! Repository data file loading.

use std::{fs, io::ErrorKind, path::Path};

use super::error::ResolveError;
use super::types::RawRepo;
use crate::log;

/// Read the repository listing at `path`.
///
/// A missing file yields an empty listing; the projects page then renders
/// its empty state.
pub fn load_repos(path: &Path) -> Result<Vec<RawRepo>, ResolveError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log!("warn"; "repo data `{}` not found, projects page will be empty", path.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(ResolveError::Io(path.to_path_buf(), err)),
    };

    serde_json::from_str(&content).map_err(|err| ResolveError::Malformed(path.to_path_buf(), err))
}
