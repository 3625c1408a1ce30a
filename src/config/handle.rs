//! Shared, atomically replaceable config.
//!
//! A build takes one snapshot with [`ConfigStore::get`] and uses it for the
//! whole run, so every read inside a build sees the same `SiteConfig`. The
//! dev-server watcher swaps in a freshly loaded config between builds.
//!
//! ```text
//!   serve (HTTP thread)        watcher thread
//!          │                         │
//!          ▼                         ▼
//!     store.get()  ◄──────  store.replace(new)
//!    (lock-free)            (atomic pointer swap)
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Holder of the current [`SiteConfig`]. Constructed explicitly and passed
/// to whoever needs it; there is no process-wide instance.
#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwap<SiteConfig>,
}

impl ConfigStore {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Current config. Returns the same `Arc` until [`replace`](Self::replace).
    #[inline]
    pub fn get(&self) -> Arc<SiteConfig> {
        self.current.load_full()
    }

    /// Swap in a new config. Snapshots taken earlier stay valid.
    pub fn replace(&self, config: SiteConfig) {
        self.current.store(Arc::new(config));
    }
}
