//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section            | Purpose                                          |
//! |--------------------|--------------------------------------------------|
//! | `[base]`           | Identity (name, title, biography, avatar)        |
//! | `[[social]]`       | Social links                                     |
//! | `[[education]]`    | Education timeline                               |
//! | `[[interests]]`    | Research interests                               |
//! | `[[experience]]`   | Grouped work/teaching/volunteer history          |
//! | `[[awards]]`       | Awards                                           |
//! | `tag_colors`       | Fallback palette for tags                        |
//! | `[[tags]]`         | Tag taxonomy                                     |
//! | `[pages]`          | Route prefixes                                   |
//! | `[integrations]`   | Comments, contact form, analytics (env-aware)    |
//! | `[build]`          | Data file, assets, output, minify                |
//! | `[serve]`          | Development server                               |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Liam Cawley"
//! description = "Personal Website of Liam Cawley"
//! url = "https://www.cawley.dev"
//!
//! [[tags]]
//! id = "rust"
//! name = "Rust"
//!
//! [build]
//! repos = "data/repos.json"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod handle;
pub mod integrations;
pub mod pages;
mod profile;
mod serve;
mod tags;

pub use base::BaseConfig;
pub use build::BuildConfig;
pub use error::ConfigError;
pub use handle::ConfigStore;
pub use integrations::IntegrationsConfig;
pub use pages::PagesConfig;
pub use profile::{Award, Education, ExperienceGroup, ExperienceItem, Interest, Position, SocialLink};
pub use serve::ServeConfig;
pub use tags::Tag;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, PartialEq, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub base: BaseConfig,

    #[serde(default)]
    pub social: Vec<SocialLink>,

    #[serde(default)]
    pub education: Vec<Education>,

    #[serde(default)]
    pub interests: Vec<Interest>,

    #[serde(default)]
    pub experience: Vec<ExperienceGroup>,

    #[serde(default)]
    pub awards: Vec<Award>,

    #[serde(default = "defaults::tag_colors")]
    #[educe(Default = defaults::tag_colors())]
    pub tag_colors: Vec<String>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub pages: PagesConfig,

    #[serde(default)]
    pub integrations: IntegrationsConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load, apply CLI and environment overrides, and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        if !config_path.exists() {
            bail!(
                "Config file `{}` not found. Run `folio init` first.",
                config_path.display()
            );
        }

        let mut config = Self::from_path(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?;
        config.update_with_cli(cli);
        config.integrations.apply_env();
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => cli
                .root
                .clone()
                .unwrap_or_else(|| self.get_root().to_owned())
                .join(name),
            _ => cli
                .root
                .clone()
                .unwrap_or_else(|| self.get_root().to_owned()),
        };
        self.update_path_with_root(&root, &cli.config);

        match &cli.command {
            Commands::Build { build_args } => {
                Self::update_option(&mut self.build.clean, build_args.clean.then_some(&true));
                Self::update_option(&mut self.build.minify, build_args.minify.as_ref());
                if let Some(url) = &build_args.base_url {
                    self.base.url = Some(url.trim_end_matches('/').to_string());
                }
            }
            Commands::Serve {
                build_args,
                interface,
                port,
                watch,
            } => {
                Self::update_option(&mut self.build.clean, build_args.clean.then_some(&true));
                Self::update_option(&mut self.build.minify, build_args.minify.as_ref());
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
                self.base.url = Some(format!(
                    "http://{}:{}",
                    self.serve.interface, self.serve.port
                ));
            }
            Commands::Init { .. } => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against root and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.repos = Self::normalize_path(&root.join(&self.build.repos));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Check the invariants the page pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Validation(msg));

        if self.base.title.trim().is_empty() {
            return invalid("[base.title] must not be empty".into());
        }

        if let Some(url) = &self.base.url
            && !url.starts_with("http")
        {
            return invalid("[base.url] must start with http:// or https://".into());
        }

        let mut tag_ids = HashSet::new();
        for tag in &self.tags {
            if tag.id.is_empty() {
                return invalid(format!("[[tags]] `{}` has an empty id", tag.name));
            }
            if !tag
                .id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
            {
                return invalid(format!(
                    "[[tags]] id `{}` may only contain ASCII letters, digits, '-' and '_'",
                    tag.id
                ));
            }
            if !tag_ids.insert(tag.id.as_str()) {
                return invalid(format!("[[tags]] duplicate id `{}`", tag.id));
            }
        }

        for (index, color) in self.tag_colors.iter().enumerate() {
            if !is_css_color(color) {
                return invalid(format!("[tag_colors] entry {index} `{color}` is not a CSS color"));
            }
        }
        for tag in &self.tags {
            if let Some(color) = &tag.color
                && !is_css_color(color)
            {
                return invalid(format!("[[tags]] `{}` color `{color}` is not a CSS color", tag.id));
            }
        }

        let mut prefixes = HashSet::new();
        for (field, prefix) in self.pages.entries() {
            let prefix = pages::normalize(prefix);
            if field != "home" && prefix.is_empty() {
                return invalid(format!("[pages.{field}] must not be the site root"));
            }
            if !prefixes.insert(prefix) {
                return invalid(format!("[pages.{field}] `{prefix}` is used by another page"));
            }
        }

        Ok(())
    }
}

/// Names, hex values and functional notation such as `rgb(1, 2, 3)`.
/// Colors are written into inline CSS, so nothing that can end a rule.
fn is_css_color(color: &str) -> bool {
    !color.trim().is_empty()
        && color
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' '))
}

// ============================================================================
// Tests
// ============================================================================
