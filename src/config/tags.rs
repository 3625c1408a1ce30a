//! `[[tags]]` taxonomy.

use serde::{Deserialize, Serialize};

/// A category tag.
///
/// ```toml
/// [[tags]]
/// id = "rust"
/// name = "Rust"
/// description = "A language empowering everyone..."
/// color = "#dea584"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tag {
    /// Unique identifier, also used as the URL segment.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Explicit color. Falls back to the `tag_colors` palette when absent.
    #[serde(default)]
    pub color: Option<String>,
}

impl Tag {
    /// Color for this tag, cycling through `palette` by position when the
    /// tag has no color of its own.
    pub fn color_or<'a>(&'a self, index: usize, palette: &'a [String]) -> &'a str {
        match (&self.color, palette.is_empty()) {
            (Some(color), _) => color,
            (None, false) => &palette[index % palette.len()],
            (None, true) => "gray",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, color: Option<&str>) -> Tag {
        Tag {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            color: color.map(Into::into),
        }
    }

    #[test]
    fn test_explicit_color_wins() {
        let palette = vec!["red".to_string()];
        assert_eq!(tag("rust", Some("#dea584")).color_or(0, &palette), "#dea584");
    }

    #[test]
    fn test_palette_cycles() {
        let palette = vec!["red".to_string(), "blue".to_string()];
        assert_eq!(tag("a", None).color_or(0, &palette), "red");
        assert_eq!(tag("b", None).color_or(1, &palette), "blue");
        assert_eq!(tag("c", None).color_or(2, &palette), "red");
    }

    #[test]
    fn test_empty_palette_falls_back() {
        assert_eq!(tag("a", None).color_or(3, &[]), "gray");
    }
}
