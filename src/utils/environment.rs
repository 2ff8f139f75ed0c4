use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding where preferences are stored
pub const CONFIG_DIR_ENV: &str = "LASTSEEN_CONFIG_DIR";

/// Get the directory holding viewer preferences
///
/// `$LASTSEEN_CONFIG_DIR` when set, otherwise the platform config dir
/// (`~/.config/lastseen` on Linux).
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(base.join("lastseen"))
}
