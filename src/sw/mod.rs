//! Service worker: background update checking for the emitted site.
//!
//! Two artifacts are produced:
//!
//! | Artifact      | Where                          | Role                                  |
//! |---------------|--------------------------------|---------------------------------------|
//! | `register.js` | inlined at the end of each page | registers the worker, drives the update lifecycle |
//! | `sw.js`       | `/sw.js`                       | cache-first worker, versioned by content hash |
//!
//! The worker's cache name embeds a BLAKE3 hash of every other emitted file,
//! so any change to the site makes `sw.js` byte-different and the browser
//! reports an update on the next visit.

mod lifecycle;

use lifecycle::{UpdateEvent, UpdateState, transition_table};

use crate::{page::Route, utils::fs::write_file};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// URL the worker is served from. Root scope covers the whole site.
pub const SW_PATH: &str = "/sw.js";

const REGISTER_TEMPLATE: &str = include_str!("../embed/sw/register.js");
const WORKER_TEMPLATE: &str = include_str!("../embed/sw/sw.js");

/// Hex digits of the content hash kept in the cache name.
const VERSION_LEN: usize = 16;

/// Registration script inlined into every page.
pub fn register_script() -> String {
    REGISTER_TEMPLATE
        .replace("{{transitions}}", &transitions_json())
        .replace("{{idle}}", UpdateState::default().js_name())
        .replace("{{page_loaded}}", UpdateEvent::PageLoaded.js_name())
        .replace("{{update_found}}", UpdateEvent::UpdateFound.js_name())
        .replace("{{controller_changed}}", UpdateEvent::ControllerChanged.js_name())
        .replace("{{registration_failed}}", UpdateEvent::RegistrationFailed.js_name())
        .replace("{{sw_path}}", SW_PATH)
}

/// `{"state|event": [next, reload]}` for the page-side dispatcher.
fn transitions_json() -> String {
    let table: serde_json::Map<String, serde_json::Value> = transition_table()
        .into_iter()
        .map(|t| {
            let key = format!("{}|{}", t.from.js_name(), t.event.js_name());
            (key, serde_json::json!([t.to.js_name(), t.reload]))
        })
        .collect();
    serde_json::Value::Object(table).to_string()
}

/// Write `sw.js` into `output`, precaching the given routes.
///
/// Must run after every other file has been written. Returns the version.
pub fn emit(output: &Path, routes: &[Route]) -> Result<String> {
    let version = content_version(output)?;
    let precache: Vec<String> = routes.iter().map(Route::url).collect();
    let precache = serde_json::to_string(&precache)?;

    let script = WORKER_TEMPLATE
        .replace("{{version}}", &version)
        .replace("{{precache}}", &precache);
    write_file(&output.join(SW_PATH.trim_start_matches('/')), script.as_bytes())?;

    Ok(version)
}

/// Hash of every file under `output` except the worker itself.
fn content_version(output: &Path) -> Result<String> {
    let worker = output.join(SW_PATH.trim_start_matches('/'));
    let mut hasher = blake3::Hasher::new();

    for entry in WalkDir::new(output).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", output.display()))?;
        if !entry.file_type().is_file() || entry.path() == worker {
            continue;
        }

        let rel = entry.path().strip_prefix(output)?;
        hasher.update(rel.to_string_lossy().as_bytes());
        hasher.update(&[0]);
        hasher.update(&fs::read(entry.path())?);
    }

    let hash = hex::encode(hasher.finalize().as_bytes());
    Ok(hash[..VERSION_LEN].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Template;

    #[test]
    fn test_register_script_has_no_placeholders() {
        let script = register_script();
        assert!(!script.contains("{{"));
        assert!(script.contains("'/sw.js'"));
        assert!(script.contains("'update-found'"));
        assert!(script.contains("'controller-changed'"));
        assert!(script.contains("'registration-failed'"));
    }

    #[test]
    fn test_register_script_embeds_transition_table() {
        let script = register_script();
        let start = script.find("var TRANSITIONS = ").unwrap() + "var TRANSITIONS = ".len();
        let end = start + script[start..].find(';').unwrap();
        let table: serde_json::Value = serde_json::from_str(&script[start..end]).unwrap();

        assert_eq!(
            table,
            serde_json::json!({
                "idle|update-found": ["update-available", true],
                "update-available|controller-changed": ["reloading", false],
                "reloading|page-loaded": ["idle", false],
            })
        );
    }

    #[test]
    fn test_emit_writes_versioned_worker() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<p>v1</p>").unwrap();
        let routes = vec![Route::new("", Template::Home)];

        let version = emit(dir.path(), &routes).unwrap();
        let worker = fs::read_to_string(dir.path().join("sw.js")).unwrap();

        assert_eq!(version.len(), VERSION_LEN);
        assert!(worker.contains(&format!("folio-{version}")));
        assert!(worker.contains(r#"["/"]"#));
    }

    #[test]
    fn test_version_ignores_worker_but_tracks_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<p>v1</p>").unwrap();

        let first = emit(dir.path(), &[]).unwrap();
        let again = emit(dir.path(), &[]).unwrap();
        assert_eq!(first, again);

        fs::write(dir.path().join("index.html"), "<p>v2</p>").unwrap();
        let changed = emit(dir.path(), &[]).unwrap();
        assert_ne!(first, changed);
    }
}
