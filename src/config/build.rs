//! `[build]` section configuration.
//!
//! Input data, static assets, output directory and post-processing switches.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// repos = "data/repos.json"   # GitHub repository listing
/// assets = "static"           # Copied verbatim into the output
/// output = "public"
/// minify = true
/// ```
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// JSON export of the GitHub repository listing.
    #[serde(default = "defaults::build::repos")]
    #[educe(Default = defaults::build::repos())]
    pub repos: PathBuf,

    /// Static assets directory (avatar, resume PDF, favicon).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify HTML output.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Emit `sitemap.xml` (requires `[base] url`).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub sitemap: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
        "#,
        )
        .unwrap();

        assert_eq!(config.build.repos, PathBuf::from("data/repos.json"));
        assert_eq!(config.build.assets, PathBuf::from("static"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(config.build.minify);
        assert!(!config.build.clean);
        assert!(config.build.sitemap);
    }

    #[test]
    fn test_build_config_custom() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [build]
            repos = "github.json"
            output = "dist"
            minify = false
            clean = true
        "#,
        )
        .unwrap();

        assert_eq!(config.build.repos, PathBuf::from("github.json"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(!config.build.minify);
        assert!(config.build.clean);
    }
}
