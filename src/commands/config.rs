//! Config subcommands handler

use anyhow::{Context, Result};

use audiomark::Config;

/// Show current configuration as TOML.
///
/// Prints defaults when no config file exists.
pub fn handle_show() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let toml_str = toml::to_string_pretty(&config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Print the config file location, whether or not it exists.
pub fn handle_path() -> Result<()> {
    let path = Config::config_path()?;
    println!("{}", path.display());
    Ok(())
}
