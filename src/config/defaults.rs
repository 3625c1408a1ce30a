//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn avatar() -> String {
        "avatar.png".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// Tag Palette Defaults
// ============================================================================

pub fn tag_colors() -> Vec<String> {
    [
        "magenta", "red", "volcano", "orange", "gold", "lime", "green", "cyan", "blue",
        "geekblue", "purple",
    ]
    .into_iter()
    .map(Into::into)
    .collect()
}

// ============================================================================
// [pages] Section Defaults
// ============================================================================

pub mod pages {
    pub fn home() -> String {
        "/".into()
    }

    pub fn resume() -> String {
        "resume".into()
    }

    pub fn contact() -> String {
        "contact".into()
    }

    pub fn tags() -> String {
        "tags".into()
    }

    pub fn projects() -> String {
        "projects".into()
    }
}

// ============================================================================
// [integrations] Section Defaults
// ============================================================================

pub mod integrations {
    pub fn disqus_script() -> String {
        "https://tc-imba.disqus.com/embed.js".into()
    }

    pub fn contact_form_url() -> String {
        "https://getform.io/f/09a3066f-c638-40db-ad59-05e4ed71e451".into()
    }

    pub fn google_analytics_id() -> String {
        "G-ZK3P43DY6M".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn repos() -> PathBuf {
        "data/repos.json".into()
    }

    pub fn assets() -> PathBuf {
        "static".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
