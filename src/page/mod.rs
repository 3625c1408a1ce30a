//! Page model and rendering.
//!
//! ```text
//! plan_routes() ──► Route ──► template::render() ──► PageElement ──► wrap() ──► minify ──► RenderedPage
//!  (config +        (path,     (binds config or       (title, body,   (fixed
//!   RepoStore)       template)  RepoStore data)        comments?)      providers)
//! ```

mod route;
mod template;
mod wrap;

pub use route::plan_routes;
use wrap::wrap;

use crate::{
    config::SiteConfig,
    data::RepoStore,
    utils::{
        minify::{MinifyType, minify},
        slug::route_url,
    },
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Which template renders a route, with the key it binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Home,
    Resume,
    Contact,
    TagIndex,
    Tag { id: String },
    ProjectIndex,
    Project { id: String },
    NotFound,
}

impl Template {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Resume => "resume",
            Self::Contact => "contact",
            Self::TagIndex => "tag-index",
            Self::Tag { .. } => "tag",
            Self::ProjectIndex => "project-index",
            Self::Project { .. } => "project",
            Self::NotFound => "not-found",
        }
    }
}

/// A page to emit: route path plus the template bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Path without surrounding slashes, `""` for the site root
    pub path: String,
    pub template: Template,
}

impl Route {
    pub fn new(path: impl Into<String>, template: Template) -> Self {
        Self {
            path: path.into(),
            template,
        }
    }

    /// URL the page is served under.
    pub fn url(&self) -> String {
        match self.template {
            Template::NotFound => "/404.html".to_string(),
            _ => route_url(&self.path),
        }
    }

    /// File the page is written to inside `output`.
    pub fn output_file(&self, output: &Path) -> PathBuf {
        match self.template {
            Template::NotFound => output.join("404.html"),
            _ if self.path.is_empty() => output.join("index.html"),
            _ => output.join(&self.path).join("index.html"),
        }
    }
}

/// Template output before wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    /// Page title; `None` uses the site title alone
    pub title: Option<String>,
    pub description: String,
    /// Inner HTML of `<main>`
    pub body: String,
    /// Attach the comment widget
    pub comments: bool,
}

/// A fully rendered page, ready to be written.
#[derive(Debug)]
pub struct RenderedPage {
    pub route: Route,
    pub html: Vec<u8>,
}

/// Render one route: bind data, wrap with providers, minify.
pub fn render_page(route: &Route, config: &SiteConfig, repos: &RepoStore) -> Result<RenderedPage> {
    let element = template::render(&route.template, config, repos)
        .with_context(|| format!("Failed to render `{}` ({})", route.url(), route.template.name()))?;
    let html = wrap(element, config);
    let html = minify(MinifyType::Html(html.as_bytes()), config).into_owned();

    Ok(RenderedPage {
        route: route.clone(),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_and_file() {
        let output = Path::new("/out");

        let home = Route::new("", Template::Home);
        assert_eq!(home.url(), "/");
        assert_eq!(home.output_file(output), Path::new("/out/index.html"));

        let project = Route::new("projects/folio", Template::Project { id: "1".into() });
        assert_eq!(project.url(), "/projects/folio/");
        assert_eq!(
            project.output_file(output),
            Path::new("/out/projects/folio/index.html")
        );

        let missing = Route::new("404", Template::NotFound);
        assert_eq!(missing.url(), "/404.html");
        assert_eq!(missing.output_file(output), Path::new("/out/404.html"));
    }

    #[test]
    fn test_render_missing_project_fails() {
        let mut config = SiteConfig::default();
        config.base.title = "Test".into();
        let repos = RepoStore::default();
        let route = Route::new(
            "projects/ghost",
            Template::Project {
                id: "nonexistent-id".into(),
            },
        );

        let err = render_page(&route, &config, &repos).unwrap_err();
        assert!(format!("{err:#}").contains("nonexistent-id"));
    }

    #[test]
    fn test_render_page_wraps_document() {
        let mut config = SiteConfig::default();
        config.base.title = "Test".into();
        config.build.minify = false;
        let repos = RepoStore::default();

        let page = render_page(&Route::new("", Template::Home), &config, &repos).unwrap();
        let html = String::from_utf8(page.html).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test</title>"));
    }
}
