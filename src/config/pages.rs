//! `[pages]` section configuration.
//!
//! Route prefixes for each generated page family.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[pages]` section in folio.toml.
///
/// # Example
/// ```toml
/// [pages]
/// home = "/"
/// resume = "cv"
/// projects = "code"
/// ```
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PagesConfig {
    #[serde(default = "defaults::pages::home")]
    #[educe(Default = defaults::pages::home())]
    pub home: String,

    #[serde(default = "defaults::pages::resume")]
    #[educe(Default = defaults::pages::resume())]
    pub resume: String,

    #[serde(default = "defaults::pages::contact")]
    #[educe(Default = defaults::pages::contact())]
    pub contact: String,

    #[serde(default = "defaults::pages::tags")]
    #[educe(Default = defaults::pages::tags())]
    pub tags: String,

    #[serde(default = "defaults::pages::projects")]
    #[educe(Default = defaults::pages::projects())]
    pub projects: String,
}

impl PagesConfig {
    /// All prefixes with their field names, for validation and navigation.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("home", &self.home),
            ("resume", &self.resume),
            ("contact", &self.contact),
            ("tags", &self.tags),
            ("projects", &self.projects),
        ]
    }
}

/// Normalize a configured prefix to a route path without surrounding slashes.
///
/// `"/"` and `""` both mean the site root and normalize to `""`.
pub fn normalize(prefix: &str) -> &str {
    prefix.trim_matches('/')
}
