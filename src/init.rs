//! Site initialization module.
//!
//! Creates a new site with a starter configuration.

use crate::{cli::Cli, config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Starter configuration, written as `folio.toml`
const STARTER_CONFIG: &str = include_str!("embed/init/folio.toml");

/// Empty repository listing
const STARTER_REPOS: &str = "[]\n";

/// Create a new site under the root chosen by `cli`.
pub fn new_site(cli: &Cli) -> Result<()> {
    let mut config = SiteConfig::default();
    config.update_with_cli(cli);
    let root = config.get_root();

    if config.config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config.config_path.display()
        );
    }
    // Without a name the site lands in the current directory, which must be empty
    let has_name = matches!(cli.command, crate::cli::Commands::Init { name: Some(_) });
    if !has_name && !is_dir_empty(root)? {
        bail!("Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory.");
    }

    init_site_structure(&config)?;
    init_ignored_files(root, &[Path::new("/public/")])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write the starter config, data file and assets directory.
fn init_site_structure(config: &SiteConfig) -> Result<()> {
    let write = |path: &Path, content: &str| -> Result<()> {
        if path.exists() {
            bail!("Path `{}` already exists.", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    };

    write(&config.config_path, STARTER_CONFIG)?;
    write(&config.build.repos, STARTER_REPOS)?;
    fs::create_dir_all(&config.build.assets)
        .with_context(|| format!("Failed to create {}", config.build.assets.display()))?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use std::path::PathBuf;

    fn init_cli(root: &Path, name: Option<&str>) -> Cli {
        Cli {
            root: Some(root.to_path_buf()),
            config: PathBuf::from("folio.toml"),
            command: Commands::Init {
                name: name.map(PathBuf::from),
            },
        }
    }

    #[test]
    fn test_starter_config_is_valid() {
        let config = SiteConfig::from_str(STARTER_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config.experience.len(), 2);
        assert_eq!(config.tags.len(), 2);
    }

    #[test]
    fn test_new_site_layout() {
        let dir = tempfile::tempdir().unwrap();
        new_site(&init_cli(dir.path(), Some("site"))).unwrap();

        let site = dir.path().join("site");
        assert!(site.join("folio.toml").is_file());
        assert_eq!(fs::read_to_string(site.join("data/repos.json")).unwrap(), "[]\n");
        assert!(site.join("static").is_dir());
        assert!(site.join(".gitignore").is_file());
    }

    #[test]
    fn test_new_site_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cli = init_cli(dir.path(), Some("site"));
        new_site(&cli).unwrap();

        let err = new_site(&cli).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_new_site_requires_empty_dir_without_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let err = new_site(&init_cli(dir.path(), None)).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }
}
