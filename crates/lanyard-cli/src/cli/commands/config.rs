//! Config command handlers.

use anyhow::Result;

use lanyard_core::config::{Config, paths};

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let config_path = paths::config_path();
    Config::init(&config_path)?;
    println!("✓ Created {}", config_path.display());
    Ok(())
}

pub fn set_url(url: &str) -> Result<()> {
    let config_path = paths::config_path();
    Config::save_api_url_to(&config_path, url)?;
    println!("✓ api_base_url set to {url}");
    Ok(())
}
