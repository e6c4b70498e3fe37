use anyhow::Context;
use iwmenu::MenuConfig;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("iwmenu");
        path.push("config.toml");
        path
    })
}

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one, the user config is read if
/// present and defaults are used otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<MenuConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file, using defaults");
                return Ok(MenuConfig::default());
            }
        },
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn parse_config(text: &str) -> Result<MenuConfig, toml::de::Error> {
    toml::from_str(text)
}
