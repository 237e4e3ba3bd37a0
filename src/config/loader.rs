use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::ScraperConfig;

const APP_DIR: &str = "webchat-scraper";
const LOCAL_CONFIG: &str = "webchat-scraper.toml";

/// Config files searched from lowest to highest priority
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR).join("config.toml"));
    }
    paths.push(PathBuf::from(LOCAL_CONFIG));
    paths
}

/// Load configuration by merging every discovered TOML layer.
/// An explicit path (the `--config` flag) is applied last and must exist.
pub fn load(explicit: Option<&Path>) -> Result<ScraperConfig> {
    load_layers(&config_search_paths(), explicit)
}

/// Merge the given optional layers plus an explicit one into a config
pub fn load_layers(search_paths: &[PathBuf], explicit: Option<&Path>) -> Result<ScraperConfig> {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for path in search_paths {
        if path.is_file() {
            debug!(path = %path.display(), "loading config layer");
            merge_toml(&mut merged, read_layer(path)?);
        }
    }

    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }
        debug!(path = %path.display(), "loading explicit config");
        merge_toml(&mut merged, read_layer(path)?);
    }

    let config: ScraperConfig = merged.try_into().context("Invalid scraper configuration")?;
    Ok(config)
}

fn read_layer(path: &Path) -> Result<toml::Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Deep-merge `src` into `dst`; `src` wins on scalar conflicts
fn merge_toml(dst: &mut toml::Value, src: toml::Value) {
    match (dst, src) {
        (toml::Value::Table(d), toml::Value::Table(s)) => {
            for (k, v) in s {
                match d.get_mut(&k) {
                    Some(existing) => merge_toml(existing, v),
                    None => {
                        d.insert(k, v);
                    }
                }
            }
        }
        (dst, src) => *dst = src,
    }
}
