//! `[integrations]` section configuration.
//!
//! Third-party endpoints embedded in the emitted pages. Each one can be
//! overridden from the environment at build time, so deployments can swap
//! them without editing folio.toml.
//!
//! Precedence: environment variable > config file > built-in default.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `disqus_script`.
pub const DISQUS_SCRIPT_ENV: &str = "DISQUS_SCRIPT";
/// Environment variable overriding `contact_form_url`.
pub const CONTACT_FORM_ENV: &str = "CONTACT_FORM_ENDPOINT";
/// Environment variable overriding `google_analytics_id`.
pub const GA_TRACKING_ENV: &str = "GA_TRACKING_ID";

/// `[integrations]` section in folio.toml.
///
/// # Example
/// ```toml
/// [integrations]
/// disqus_script = "https://example.disqus.com/embed.js"
/// contact_form_url = "https://getform.io/f/xxxx"
/// google_analytics_id = "G-XXXXXXX"
/// ```
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IntegrationsConfig {
    /// Comment widget embed script, loaded on project pages.
    #[serde(default = "defaults::integrations::disqus_script")]
    #[educe(Default = defaults::integrations::disqus_script())]
    pub disqus_script: String,

    /// Submission endpoint of the contact form.
    #[serde(default = "defaults::integrations::contact_form_url")]
    #[educe(Default = defaults::integrations::contact_form_url())]
    pub contact_form_url: String,

    /// Google Analytics measurement id.
    #[serde(default = "defaults::integrations::google_analytics_id")]
    #[educe(Default = defaults::integrations::google_analytics_id())]
    pub google_analytics_id: String,
}

impl IntegrationsConfig {
    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. Empty values count as unset.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = lookup(DISQUS_SCRIPT_ENV) {
            self.disqus_script = value;
        }
        if let Some(value) = lookup(CONTACT_FORM_ENV) {
            self.contact_form_url = value;
        }
        if let Some(value) = lookup(GA_TRACKING_ENV) {
            self.google_analytics_id = value;
        }
    }
}
