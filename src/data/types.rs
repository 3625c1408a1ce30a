//! Repository records.
//!
//! [`RawRepo`] mirrors an item of the GitHub REST `repos` listing; unknown
//! fields are ignored so an API response can be saved as-is.
//! [`RepoEntry`] is the bound form handed to templates.

use serde::Deserialize;

/// GitHub ids are numbers, other exporters use strings. Both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// One repository as read from the data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub id: RawId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
}

/// A repository with its resolved page path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub language: Option<String>,
    /// Route of the detail page, e.g. `projects/folio`
    pub path: String,
}
