use std::path::{Path, PathBuf};

use super::Config;

/// Returns the config directory: `~/.config/veil/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("veil"))
}

/// Returns the config file path: `~/.config/veil/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Reads and parses a config file, then clamps values via [`Config::validate`].
///
/// Returns an error string naming the file on IO or parse failure.
pub fn load_from(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads `~/.config/veil/config.toml`, falling back to defaults.
///
/// A missing file (or no home directory) yields defaults. A file that
/// exists but cannot be read or parsed is an error, since silently
/// ignoring it would act on the wrong window settings.
pub fn load() -> Result<Config, String> {
    match config_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(Config::default()),
    }
}

fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}
