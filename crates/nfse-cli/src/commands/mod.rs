//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod extract;
pub mod serve;

use std::path::{Path, PathBuf};

use tracing::debug;

use nfse_core::NfseConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nfse")
        .join("config.json")
}

/// Load configuration from `--config`, the default path, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<NfseConfig> {
    if let Some(path) = config_path {
        debug!("Loading configuration from {}", path);
        return Ok(NfseConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(NfseConfig::from_file(&default_path)?)
    } else {
        Ok(NfseConfig::default())
    }
}
