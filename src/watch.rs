//! File system watcher for live rebuild.
//!
//! Monitors the config file, the repo data file and the assets directory,
//! and rebuilds the whole site when any of them change.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Event Loop                              │
//! │                                                              │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│    handle_changes()    │  │
//! │  │ events   │    │ (300ms)  │    │                        │  │
//! │  └──────────┘    └──────────┘    │  config changed?       │  │
//! │                                  │   └─ reload + replace  │  │
//! │                                  │  build_site(snapshot)  │  │
//! │                                  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::{
    build::build_site,
    cli::Cli,
    config::{ConfigStore, SiteConfig},
    log,
    logger::WatchStatus,
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

// =============================================================================
// Constants
// =============================================================================

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// `/proj/static/avatar.png` → `static/avatar.png`
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: HashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: HashSet::new(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<_> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Rebuild after `paths` changed. Returns true if the rebuild succeeded.
///
/// A config change reloads the file first; if the new config fails to load
/// the previous snapshot stays in place and nothing is rebuilt.
fn handle_changes(paths: &[PathBuf], store: &ConfigStore, cli: &Cli, status: &mut WatchStatus) -> bool {
    let current = store.get();
    let root = current.get_root().to_path_buf();
    let trigger = paths
        .iter()
        .map(|p| rel_path(p, &root))
        .collect::<Vec<_>>()
        .join(", ");

    if paths.iter().any(|p| p == &current.config_path) {
        match SiteConfig::load(cli) {
            Ok(config) => store.replace(config),
            Err(e) => {
                status.error("config reload failed", &format!("{e:#}"));
                return false;
            }
        }
    }

    match build_site(&store.get()) {
        Ok(routes) => {
            status.success(&format!("rebuilt {} pages ({trigger})", routes.len()));
            true
        }
        Err(e) => {
            status.error(&format!("build failed ({trigger})"), &format!("{e:#}"));
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Watched path and its recursion mode
type Target = (PathBuf, RecursiveMode);

/// Paths to watch, with their recursion mode. Missing paths are skipped.
fn watch_targets(config: &SiteConfig) -> Vec<Target> {
    let build = &config.build;
    [
        (config.config_path.clone(), RecursiveMode::NonRecursive),
        (build.repos.clone(), RecursiveMode::NonRecursive),
        (build.assets.clone(), RecursiveMode::Recursive),
    ]
    .into_iter()
    .filter(|(path, _)| path.exists())
    .collect()
}

/// Targets to drop and to add when moving from `old` to `new`.
fn diff_targets<'a>(old: &'a [Target], new: &'a [Target]) -> (Vec<&'a Target>, Vec<&'a Target>) {
    let removed = old.iter().filter(|t| !new.contains(t)).collect();
    let added = new.iter().filter(|t| !old.contains(t)).collect();
    (removed, added)
}

/// Bring the watcher in line with `config`. `watched` holds the current set.
fn sync_watchers(watcher: &mut impl Watcher, watched: &mut Vec<Target>, config: &SiteConfig) -> Result<()> {
    let targets = watch_targets(config);
    let (removed, added) = diff_targets(watched, &targets);
    if removed.is_empty() && added.is_empty() {
        return Ok(());
    }

    for (path, _) in removed {
        // Already gone when the path itself was deleted
        watcher.unwatch(path).ok();
    }
    for (path, mode) in added {
        watcher
            .watch(path, *mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
    }

    let root = config.get_root();
    let names: Vec<_> = targets.iter().map(|(p, _)| rel_path(p, root)).collect();
    log!("watch"; "{}", names.join(", "));
    *watched = targets;
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
///
/// Watched paths follow the current config and are refreshed after each
/// rebuild.
pub fn watch_for_changes_blocking(store: &ConfigStore, cli: &Cli) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    let mut watched = Vec::new();
    sync_watchers(&mut watcher, &mut watched, &store.get())?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), store, cli, &mut status) {
                    debouncer.mark_rebuild();
                }
                // A reloaded config may point at other data or asset paths
                if let Err(e) = sync_watchers(&mut watcher, &mut watched, &store.get()) {
                    log!("watch"; "{e:#}");
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
