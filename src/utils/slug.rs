//! URL slugification.

use deunicode::deunicode;

/// Convert text to a lowercase ASCII slug.
///
/// Non-ASCII characters are transliterated first, then every run of
/// characters outside `[a-z0-9_]` collapses into a single `-`.
///
/// `"Hello, World!"` → `"hello-world"`, `"Ĉu vi?"` → `"cu-vi"`
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_ascii_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Join route segments into a path without leading or trailing slashes.
///
/// Empty segments (the site root) are skipped.
pub fn join_route(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Route path to the URL it is served under: `""` → `/`, `a/b` → `/a/b/`.
pub fn route_url(route: &str) -> String {
    if route.is_empty() {
        "/".to_string()
    } else {
        format!("/{route}/")
    }
}
