//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing every page for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    log,
    page::{Route, Template},
    utils::{
        fs::write_file,
        html::escape_xml,
        minify::{MinifyType, minify},
    },
};
use anyhow::{Context, Result};

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Output file name, relative to the output directory
const SITEMAP_FILE: &str = "sitemap.xml";

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
///
/// Needs an absolute `base.url`; without one the sitemap is skipped.
pub fn build_sitemap(config: &SiteConfig, routes: &[Route]) -> Result<()> {
    if !config.build.sitemap {
        return Ok(());
    }
    let Some(base_url) = config.base.url.as_deref() else {
        log!("sitemap"; "skipped, no `base.url` configured");
        return Ok(());
    };

    let lastmod = chrono::Local::now().format("%Y-%m-%d").to_string();
    Sitemap::from_routes(routes, base_url, &lastmod).write(config)
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// YYYY-MM-DD
    lastmod: Option<String>,
}

impl Sitemap {
    /// Every routable page. The 404 page is not indexed.
    fn from_routes(routes: &[Route], base_url: &str, lastmod: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let urls = routes
            .iter()
            .filter(|route| route.template != Template::NotFound)
            .map(|route| UrlEntry {
                loc: format!("{base_url}{}", route.url()),
                lastmod: Some(lastmod.to_string()),
            })
            .collect();

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to the output directory.
    fn write(self, config: &SiteConfig) -> Result<()> {
        let path = config.build.output.join(SITEMAP_FILE);
        let count = self.urls.len();
        let xml = self.into_xml();
        let xml = minify(MinifyType::Xml(xml.as_bytes()), config);

        write_file(&path, &xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{SITEMAP_FILE} ({count} urls)");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn routes() -> Vec<Route> {
        vec![
            Route::new("", Template::Home),
            Route::new("projects/a&b", Template::Project { id: "1".into() }),
            Route::new("404", Template::NotFound),
        ]
    }

    #[test]
    fn test_sitemap_empty() {
        let xml = Sitemap::from_routes(&[], "https://example.com", "2025-01-01").into_xml();

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_sitemap_skips_not_found() {
        let xml = Sitemap::from_routes(&routes(), "https://example.com/", "2025-01-01").into_xml();

        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<lastmod>2025-01-01</lastmod>"));
        assert!(!xml.contains("404"));
    }

    #[test]
    fn test_sitemap_escapes_special_chars() {
        let xml = Sitemap::from_routes(&routes(), "https://example.com", "2025-01-01").into_xml();
        assert!(xml.contains("<loc>https://example.com/projects/a&amp;b/</loc>"));
    }

    #[test]
    fn test_build_sitemap_needs_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_path_buf();

        build_sitemap(&config, &routes()).unwrap();
        assert!(!dir.path().join(SITEMAP_FILE).exists());

        config.base.url = Some("https://example.com".into());
        build_sitemap(&config, &routes()).unwrap();
        let xml = fs::read_to_string(dir.path().join(SITEMAP_FILE)).unwrap();
        assert!(xml.contains("https://example.com/"));
    }

    #[test]
    fn test_build_sitemap_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_path_buf();
        config.base.url = Some("https://example.com".into());
        config.build.sitemap = false;

        build_sitemap(&config, &routes()).unwrap();
        assert!(!dir.path().join(SITEMAP_FILE).exists());
    }
}
