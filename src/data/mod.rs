//! Repository data source.
//!
//! The site's project pages are bound to a GitHub repository listing that is
//! fetched outside of folio (for example `gh api users/<name>/repos >
//! data/repos.json`). This module loads that file and answers the two
//! queries the templates need.
//!
//! ```text
//! data/repos.json ──► load_repos() ──► RepoStore::new() ──┬─► list()     → projects index
//!                     (Vec<RawRepo>)   (sort, bind paths)  └─► get(id)    → project detail
//! ```

mod error;
mod source;
mod store;
mod types;

pub use error::ResolveError;
pub use source::load_repos;
pub use store::RepoStore;
pub use types::RepoEntry;
