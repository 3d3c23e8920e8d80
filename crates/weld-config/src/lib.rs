//! Weld widget configuration.
//!
//! One TOML file per widget. All sections use defaults so partial configs
//! work out of the box.
//!
//! ```rust,no_run
//! use weld_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{DimensionSection, MaskSection, WeldConfig, WidgetSection};
pub use toml_loader::{default_config_path, load_from_path, widget_dir};

use weld_common::ConfigError;

/// Load and validate `config.toml` from the platform config directory.
pub fn load_config() -> Result<WeldConfig, ConfigError> {
    toml_loader::load_default()
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WeldConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
