use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

/// Where to look for the favorites document. The primary location is
/// `<profile_dir>/<file_name>`; `extra_paths` are fallbacks for
/// non-standard deployments, searched in order.
#[derive(Debug, Deserialize, Clone)]
pub struct FavoritesConfig {
    pub profile_dir: PathBuf,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub extra_paths: Vec<PathBuf>,
}

fn default_file_name() -> String {
    "favourites.xml".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Probe local file targets for reachability during matching. Network
    /// paths are never probed; they report unknown.
    #[serde(default = "default_probe_local_files")]
    pub probe_local_files: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            probe_local_files: default_probe_local_files(),
        }
    }
}

fn default_probe_local_files() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.favorites.file_name.trim().is_empty() {
        anyhow::bail!("favorites.file_name must not be empty");
    }

    if config.favorites.profile_dir.as_os_str().is_empty() {
        anyhow::bail!("favorites.profile_dir must not be empty");
    }

    Ok(config)
}
