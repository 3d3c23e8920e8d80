use std::path::Path;

use tracing::info;
use weld_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::WeldConfig;
use crate::validation;

/// Load and validate a config file. Missing fields take their defaults.
pub fn load_from_path(path: &Path) -> Result<WeldConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: WeldConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;

    info!(widget = %config.widget.name, "loaded config from {}", path.display());
    Ok(config)
}

/// Load `config.toml` from the platform config dir, writing a commented
/// default there first if it does not exist yet.
pub fn load_default() -> Result<WeldConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(WeldConfig::default());
    }

    load_from_path(&path)
}
