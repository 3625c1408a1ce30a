//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()      clear (if `clean`) and create the output dir
//!     │
//!     ├── load_repos()          data/repos.json ──► RepoStore
//!     │
//!     ├── plan_routes()         config + RepoStore ──► Vec<Route>
//!     │
//!     ├── render_page() × N     template ──► providers ──► minify ──► write
//!     │
//!     ├── copy_dir()            static assets ──► output
//!     │
//!     ├── build_sitemap()
//!     │
//!     └── sw::emit()            last: its version hashes everything above
//! ```

use crate::{
    config::SiteConfig,
    data::{RepoStore, load_repos},
    generator::sitemap::build_sitemap,
    log,
    logger::ProgressBar,
    page::{Route, plan_routes, render_page},
    sw,
    utils::fs::{copy_dir, write_file},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Build the entire site from one config snapshot.
///
/// Pages are rendered one at a time in route order. The first failure
/// aborts the build. Returns the emitted routes.
pub fn build_site(config: &SiteConfig) -> Result<Vec<Route>> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let raw = load_repos(&config.build.repos)?;
    let repos = RepoStore::new(raw, &config.pages.projects)
        .with_context(|| format!("Invalid repo data in {}", config.build.repos.display()))?;
    if repos.is_empty() {
        log!("data"; "no repos, projects page shows its empty state");
    } else {
        log!("data"; "{} repos", repos.len());
    }

    let routes = plan_routes(config, &repos).context("Conflicting page routes")?;

    let progress = ProgressBar::new("pages", routes.len());
    for route in &routes {
        let page = render_page(route, config, &repos)?;
        write_file(&page.route.output_file(output), &page.html)?;
        progress.inc();
    }
    progress.finish();
    log!("pages"; "rendered {} pages", routes.len());

    let copied = copy_dir(&config.build.assets, output)?;
    if copied > 0 {
        log!("assets"; "copied {copied} files");
    }

    build_sitemap(config, &routes)?;

    let version = sw::emit(output, &routes)?;
    log!("sw"; "version {version}");

    log!("build"; "done");
    Ok(routes)
}

/// Ensure the output directory exists.
///
/// When `clean` is true, removes all existing content first.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn site(dir: &Path, repos: Option<&str>) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Liam".into();
        config.base.url = Some("https://example.com".into());
        config.build.minify = false;
        config.build.repos = dir.join("data/repos.json");
        config.build.assets = dir.join("static");
        config.build.output = dir.join("public");

        if let Some(repos) = repos {
            fs::create_dir_all(dir.join("data")).unwrap();
            fs::write(&config.build.repos, repos).unwrap();
        }
        config
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_build_full_site() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(
            dir.path(),
            Some(
                r#"[
                    {"id": 1, "name": "alpha", "html_url": "https://github.com/x/alpha", "stargazers_count": 5},
                    {"id": 2, "name": "beta", "html_url": "https://github.com/x/beta", "stargazers_count": 10}
                ]"#,
            ),
        );
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/avatar.png"), b"png").unwrap();

        let routes = build_site(&config).unwrap();
        let out = dir.path().join("public");

        assert_eq!(routes.len(), 9);
        assert!(out.join("index.html").is_file());
        assert!(out.join("resume/index.html").is_file());
        assert!(out.join("404.html").is_file());
        assert!(out.join("avatar.png").is_file());
        assert!(out.join("sitemap.xml").is_file());
        assert!(out.join("sw.js").is_file());

        let listing = read(out.join("projects/index.html"));
        let beta = listing.find("/projects/beta/").unwrap();
        let alpha = listing.find("/projects/alpha/").unwrap();
        assert!(beta < alpha);

        let detail = read(out.join("projects/alpha/index.html"));
        assert!(detail.contains("https://github.com/x/alpha"));
        assert!(detail.contains("disqus_thread"));
    }

    #[test]
    fn test_build_without_repo_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), None);

        build_site(&config).unwrap();

        let listing = read(dir.path().join("public/projects/index.html"));
        assert!(listing.contains("No projects yet."));
    }

    #[test]
    fn test_build_malformed_repo_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), Some("{ nope"));

        let err = build_site(&config).unwrap_err();
        assert!(format!("{err:#}").contains("repos.json"));
    }

    #[test]
    fn test_build_clean_removes_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = site(dir.path(), Some("[]"));
        let stale = dir.path().join("public/stale.html");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        build_site(&config).unwrap();
        assert!(stale.exists());

        config.build.clean = true;
        build_site(&config).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_build_route_collision_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = site(
            dir.path(),
            Some(r#"[{"id": 1, "name": "folio", "html_url": "https://github.com/x/folio"}]"#),
        );
        config.pages.contact = "projects/folio".into();

        let err = build_site(&config).unwrap_err();
        assert!(format!("{err:#}").contains("projects/folio"));
        assert!(!dir.path().join("public/projects/folio/index.html").exists());
    }
}
