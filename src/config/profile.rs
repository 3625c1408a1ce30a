//! Biography collections: `[[social]]`, `[[education]]`, `[[interests]]`,
//! `[[experience]]` and `[[awards]]`.

use serde::{Deserialize, Serialize};

/// A link in the social bar.
///
/// `icon` is a `[prefix, name]` pair, e.g. `["fab", "github"]`.
///
/// ```toml
/// [[social]]
/// url = "https://github.com/cawley"
/// icon = ["fab", "github"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub url: String,
    pub icon: [String; 2],
}

impl SocialLink {
    /// Icon name without its prefix, used as the visible label.
    pub fn label(&self) -> &str {
        &self.icon[1]
    }
}

/// One entry of the education timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub date: String,
    #[serde(default)]
    pub icon: String,
    pub title: String,
    pub location: String,
}

/// A research interest shown on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Interest {
    #[serde(default)]
    pub icon: String,
    pub title: String,
}

/// Which column of the resume an experience group renders in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

impl Position {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A titled group of experience entries (e.g. "Work", "Teaching").
///
/// ```toml
/// [[experience]]
/// title = "Work"
/// position = "left"
///
/// [[experience.data]]
/// date = "May 2024 - August 2024"
/// title = "High Performance Computing Intern"
/// location = "San Jose, CA"
/// description = "..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceGroup {
    pub title: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: Vec<ExperienceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceItem {
    pub date: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Award {
    pub date: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    const PROFILE: &str = r#"
        [base]
        title = "Test"
        description = "Test"

        [[social]]
        url = "https://github.com/cawley"
        icon = ["fab", "github"]

        [[education]]
        date = "Sept 2021 - Present"
        icon = "university"
        title = "B.S.E. in Computer Science"
        location = "University of Michigan"

        [[interests]]
        icon = "cubes"
        title = "Machine Learning"

        [[experience]]
        title = "Work"
        position = "left"

        [[experience.data]]
        date = "May 2024 - August 2024"
        title = "High Performance Computing Intern"
        location = "San Jose, CA"
        description = "Image processing."

        [[experience]]
        title = "Teaching"
        position = "right"

        [[awards]]
        date = "December 2020"
        title = "USA Computing Olympiad Silver"
    "#;

    #[test]
    fn test_profile_sections() {
        let config: SiteConfig = toml::from_str(PROFILE).unwrap();

        assert_eq!(config.social.len(), 1);
        assert_eq!(config.social[0].label(), "github");
        assert_eq!(config.education[0].location, "University of Michigan");
        assert_eq!(config.interests[0].title, "Machine Learning");
        assert_eq!(config.experience.len(), 2);
        assert_eq!(config.experience[0].position, Position::Left);
        assert_eq!(config.experience[0].data.len(), 1);
        assert_eq!(config.experience[1].position, Position::Right);
        assert!(config.experience[1].data.is_empty());
        assert_eq!(config.awards[0].date, "December 2020");
    }

    #[test]
    fn test_invalid_position_rejected() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [[experience]]
            title = "Work"
            position = "center"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }

    #[test]
    fn test_social_icon_requires_pair() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"

            [[social]]
            url = "https://example.com"
            icon = ["fab"]
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
