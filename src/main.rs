//! Folio - a static site generator for personal academic portfolios.

mod build;
mod cli;
mod config;
mod data;
mod generator;
mod init;
mod logger;
mod page;
mod serve;
mod sw;
mod utils;
mod watch;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{ConfigStore, SiteConfig};
use init::new_site;
use serve::serve_site;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.is_init() {
        return new_site(&cli);
    }

    let store = Arc::new(ConfigStore::new(SiteConfig::load(&cli)?));

    let config = store.get();
    build_site(&config)?;
    drop(config);

    if matches!(cli.command, Commands::Serve { .. }) {
        serve_site(store, cli)?;
    }
    Ok(())
}
