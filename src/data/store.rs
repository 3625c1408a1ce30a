//! Repository store: the list + detail queries behind the project pages.
//!
//! Ordering is fixed at construction: stars descending, then name
//! ascending, then id ascending. The secondary keys make the listing
//! deterministic no matter how the data file was ordered.

use std::{cmp::Ordering, collections::HashMap};

use super::error::ResolveError;
use super::types::{RawRepo, RepoEntry};
use crate::utils::slug::{join_route, slugify};

/// Ranking used by [`RepoStore::list`].
fn compare_by_stars(a: &RepoEntry, b: &RepoEntry) -> Ordering {
    b.stargazers_count
        .cmp(&a.stargazers_count)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Read-only, build-scoped view over the repository data source.
#[derive(Debug, Default)]
pub struct RepoStore {
    /// Entries in listing order
    entries: Vec<RepoEntry>,
    /// id -> index into `entries`
    by_id: HashMap<String, usize>,
}

impl RepoStore {
    /// Bind raw records, resolving each one's page path under `prefix`.
    ///
    /// Fails when two records share an id or resolve to the same path.
    pub fn new(raw: Vec<RawRepo>, prefix: &str) -> Result<Self, ResolveError> {
        let mut entries: Vec<RepoEntry> = raw
            .into_iter()
            .map(|repo| {
                let id = repo.id.into_string();
                let slug = match slugify(&repo.name) {
                    s if s.is_empty() => slugify(&id),
                    s => s,
                };
                RepoEntry {
                    path: join_route(&[prefix, slug.as_str()]),
                    id,
                    name: repo.name,
                    description: repo.description,
                    html_url: repo.html_url,
                    stargazers_count: repo.stargazers_count,
                    language: repo.language,
                }
            })
            .collect();
        entries.sort_by(compare_by_stars);

        let mut by_id = HashMap::with_capacity(entries.len());
        let mut by_path: HashMap<&str, &str> = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id.clone(), index).is_some() {
                return Err(ResolveError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
            if let Some(first) = by_path.insert(&entry.path, &entry.name) {
                return Err(ResolveError::DuplicatePath {
                    path: entry.path.clone(),
                    first: first.to_string(),
                    second: entry.name.clone(),
                });
            }
        }

        Ok(Self { entries, by_id })
    }

    /// All entries, most starred first.
    pub fn list(&self) -> &[RepoEntry] {
        &self.entries
    }

    /// The entry with `id`.
    pub fn get(&self, id: &str) -> Result<&RepoEntry, ResolveError> {
        self.by_id
            .get(id)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| ResolveError::NotFound { id: id.to_string() })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
