//! Development server with rebuild-on-change.
//!
//! Built on `tiny_http`:
//!
//! - Static file serving from the build output directory
//! - Automatic `index.html` resolution for directories
//! - The site's own `404.html` for unknown paths
//! - File watching and auto-rebuild (via `watch` module)
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//!    Handle requests        Reload config, rebuild,
//!    Serve files            swap ConfigStore snapshot
//!          │                       │
//!          └───────────┬───────────┘
//!                      ▼
//!              config.build.output
//!                (public/ dir)
//! ```

use crate::{
    cli::Cli,
    config::{ConfigStore, SiteConfig},
    log,
    sw::SW_PATH,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server with optional file watching.
///
/// Blocks until Ctrl+C is received. Every request reads the current config
/// snapshot, so rebuilds triggered by the watcher take effect immediately.
pub fn serve_site(store: Arc<ConfigStore>, cli: Cli) -> Result<()> {
    let config = store.get();
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if config.serve.watch {
        let store = Arc::clone(&store);
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking(&store, &cli) {
                log!("watch"; "{err}");
            }
        });
    }
    drop(config);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &store.get()) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Request resolution order:
/// 1. Exact file match → serve file
/// 2. Directory with index.html → serve index.html
/// 3. Nothing found → the site's 404.html with status 404
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let serve_root = &config.build.output;

    match resolve_path(serve_root, request.url()) {
        Some(path) => serve_file(request, &path, StatusCode(200)),
        None => serve_not_found(request, serve_root),
    }
}

/// Map a request URL to a file under `root`.
///
/// Returns `None` for missing files and for paths escaping `root`.
fn resolve_path(root: &Path, url: &str) -> Option<PathBuf> {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(url).ok()?;

    // Strip query string (e.g., ?t=123456) before resolving path
    let path_without_query = url_path.split(['?', '#']).next().unwrap_or_default();
    let request_path = Path::new(path_without_query.trim_matches('/'));

    if request_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let local_path = root.join(request_path);
    if local_path.is_file() {
        return Some(local_path);
    }

    let index_path = local_path.join("index.html");
    index_path.is_file().then_some(index_path)
}

// ============================================================================
// Response Helpers
// ============================================================================

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("Invalid header `{name}: {value}`"))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path, status: StatusCode) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut response = Response::from_data(content)
        .with_status_code(status)
        .with_header(header("Content-Type", guess_content_type(path))?);

    // The worker must always be revalidated so updates are detected
    if path.file_name().and_then(|n| n.to_str()) == Some(SW_PATH.trim_start_matches('/')) {
        response.add_header(header("Cache-Control", "no-cache")?);
        response.add_header(header("Service-Worker-Allowed", "/")?);
    }

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response, using the built 404 page when present.
fn serve_not_found(request: Request, root: &Path) -> Result<()> {
    let page = root.join("404.html");
    if page.is_file() {
        return serve_file(request, &page, StatusCode(404));
    }

    let response = Response::from_string("404 Not Found")
        .with_status_code(StatusCode(404))
        .with_header(header("Content-Type", "text/plain; charset=utf-8")?);
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json" | "webmanifest") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("projects/folio")).unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::write(dir.path().join("projects/folio/index.html"), "folio").unwrap();
        fs::write(dir.path().join("my file.txt"), "spaced").unwrap();
        dir
    }

    #[test]
    fn test_resolve_index_and_files() {
        let dir = site();
        let root = dir.path();

        assert_eq!(resolve_path(root, "/"), Some(root.join("index.html")));
        assert_eq!(
            resolve_path(root, "/projects/folio/?ref=nav"),
            Some(root.join("projects/folio/index.html"))
        );
        assert_eq!(resolve_path(root, "/my%20file.txt"), Some(root.join("my file.txt")));
    }

    #[test]
    fn test_resolve_missing_and_traversal() {
        let dir = site();
        assert_eq!(resolve_path(dir.path(), "/nope/"), None);
        assert_eq!(resolve_path(dir.path(), "/../etc/passwd"), None);
        assert_eq!(resolve_path(dir.path(), "/projects/%2E%2E/index.html"), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("sw.js")), "application/javascript; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("a.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("blob")), "application/octet-stream");
    }
}
