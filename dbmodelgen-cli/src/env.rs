//! Environment file loading
//!
//! An `.env` file can carry any generation argument (`TABLE_NAME=users`,
//! `TAB=1`, ...) plus `CONFIG_PATH` pointing at the configuration document.
//! Values are read without touching the process environment.

use anyhow::Context;
use dbmodelgen::ArgumentOverrides;
use std::path::{Path, PathBuf};

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Default)]
pub struct EnvFile {
    pub config_path: Option<PathBuf>,
    pub arguments: ArgumentOverrides,
}

/// Load `path`, or `./.env` when no path is given and it exists
pub fn load(path: Option<&Path>) -> anyhow::Result<EnvFile> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Environment file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let default = PathBuf::from(DEFAULT_ENV_FILE);
            if !default.exists() {
                return Ok(EnvFile::default());
            }
            default
        }
    };

    let mut pairs = Vec::new();
    let iter = dotenv::from_path_iter(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    for item in iter {
        let (key, value) = item.with_context(|| format!("Failed to parse {}", path.display()))?;
        pairs.push((key, value));
    }
    log::debug!("Loaded {} value(s) from {}", pairs.len(), path.display());
    parse_pairs(pairs)
}

fn parse_pairs(pairs: Vec<(String, String)>) -> anyhow::Result<EnvFile> {
    let config_path = pairs
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("config_path"))
        .map(|(_, value)| PathBuf::from(value));
    let arguments = ArgumentOverrides::from_env_pairs(pairs)?;
    Ok(EnvFile {
        config_path,
        arguments,
    })
}
