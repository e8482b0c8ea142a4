use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

const HISTORY_FILE_NAME: &str = ".line_history";
const CONFIG_ENV_VAR: &str = "LINE_HISTORY_CONFIG";

/// Default history file (`~/.line_history`)
pub fn default_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(HISTORY_FILE_NAME))
}

/// Config file location: `$LINE_HISTORY_CONFIG`, else
/// `<config dir>/line-history/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("line-history").join("config.toml"))
}
