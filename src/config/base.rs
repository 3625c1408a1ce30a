//! `[base]` section configuration.
//!
//! Identity of the site owner: name, title, biography, avatar.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - who the site is about.
///
/// # Example
/// ```toml
/// [base]
/// title = "Liam Cawley"
/// description = "Personal Website of Liam Cawley"
/// author = "Liam Cawley"
/// url = "https://www.cawley.dev"
/// introduction = ["I am an undergraduate student..."]
/// professions = ["Research Engineer", "Student"]
/// ```
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title displayed in browser tab and headers.
    pub title: String,

    /// Site description for the description meta tag.
    pub description: String,

    /// Full name of the site owner.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Alternative spelling of the name (e.g. in another script).
    #[serde(default)]
    pub author_alternative: Option<String>,

    /// Base URL for absolute links in the sitemap.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Avatar image, relative to the static assets directory.
    #[serde(default = "defaults::base::avatar")]
    #[educe(Default = defaults::base::avatar())]
    pub avatar: String,

    /// BCP 47 language code.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Biography paragraphs shown on the home page. Trusted HTML.
    #[serde(default)]
    pub introduction: Vec<String>,

    /// Short role titles shown under the name.
    #[serde(default)]
    pub professions: Vec<String>,

    #[serde(default)]
    pub birthday: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Liam Cawley"
            description = "Personal Website of Liam Cawley"
            author = "Liam Cawley"
            author_alternative = "连姆·考利"
            url = "https://www.cawley.dev"
            avatar = "headshot.png"
            introduction = ["First paragraph", "Second paragraph"]
            professions = ["Research Engineer", "Student"]
            location = "New York, NY"
            email = "someone@example.com"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Liam Cawley");
        assert_eq!(config.base.author_alternative.as_deref(), Some("连姆·考利"));
        assert_eq!(config.base.url.as_deref(), Some("https://www.cawley.dev"));
        assert_eq!(config.base.avatar, "headshot.png");
        assert_eq!(config.base.introduction.len(), 2);
        assert_eq!(config.base.professions, vec!["Research Engineer", "Student"]);
        assert_eq!(config.base.location.as_deref(), Some("New York, NY"));
    }

    #[test]
    fn test_base_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test site"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.author, "<YOUR_NAME>");
        assert_eq!(config.base.avatar, "avatar.png");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
        assert!(config.base.introduction.is_empty());
        assert!(config.base.email.is_none());
    }

    #[test]
    fn test_missing_title_is_named() {
        let config = r#"
            [base]
            description = "No title here"
        "#;
        let err = toml::from_str::<SiteConfig>(config).unwrap_err().to_string();
        assert!(err.contains("title"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            nickname = "should_fail"
        "#;
        let err = toml::from_str::<SiteConfig>(config).unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
