//! Widget configuration schema.
//!
//! Every section uses `#[serde(default)]` so a file only has to name what it
//! changes.

use serde::{Deserialize, Serialize};
use weld_common::{ConfigError, PageOptions};

/// Window and page settings for one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSection {
    /// Stamped onto every bridge message; messages for other names are
    /// ignored.
    pub name: String,
    /// Page to load. Defaults to `index.html` in the widget directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub transparent: bool,
    /// Open the webview inspector on start.
    pub devtools: bool,
    /// Initial logical width (valid range: 1-8192).
    pub width: u32,
    /// Initial logical height (valid range: 1-8192).
    pub height: u32,
    /// Page runtime module, resolved against the page URL. The host imports
    /// it and calls `weldStart()` when masking or dimension sync is on.
    /// Empty leaves starting the runtime to the page.
    pub runtime: String,
}

impl Default for WidgetSection {
    fn default() -> Self {
        Self {
            name: "weld".into(),
            url: None,
            transparent: true,
            devtools: false,
            width: 400,
            height: 60,
            runtime: "weld_page.js".into(),
        }
    }
}

/// Input masking driven by marked page elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskSection {
    pub enabled: bool,
    /// CSS class that marks an element as a mask.
    pub marker_class: String,
    /// Minimum spacing between mask snapshots (valid range: 0-1000).
    pub throttle_ms: u64,
    /// Re-measure tracked elements every animation frame.
    pub poll: bool,
}

impl Default for MaskSection {
    fn default() -> Self {
        Self {
            enabled: false,
            marker_class: "mask".into(),
            throttle_ms: 100,
            poll: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionSection {
    /// Resize the window to follow the page body.
    pub sync: bool,
}

/// Top-level widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldConfig {
    pub widget: WidgetSection,
    pub mask: MaskSection,
    pub dimension: DimensionSection,
}

impl WeldConfig {
    /// The page-side view of this config, injected as `window.weldOptions`.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            name: self.widget.name.clone(),
            input_mask: self.mask.enabled,
            sync_dimension: self.dimension.sync,
            marker_class: self.mask.marker_class.clone(),
            throttle_ms: self.mask.throttle_ms,
            poll: self.mask.poll,
        }
    }

    /// The runtime module the host should import, if any.
    pub fn runtime_module(&self) -> Option<&str> {
        let runtime = self.widget.runtime.trim();
        (!runtime.is_empty()).then_some(runtime)
    }

    /// The URL the webview should load.
    pub fn entry_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.widget.url {
            return Ok(url.clone());
        }
        let index = crate::toml_loader::widget_dir(&self.widget.name)?.join("index.html");
        Ok(format!("file://{}", index.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WeldConfig::default();
        assert_eq!(config.widget.name, "weld");
        assert!(config.widget.transparent);
        assert!(!config.mask.enabled);
        assert_eq!(config.mask.marker_class, "mask");
        assert_eq!(config.mask.throttle_ms, 100);
        assert!(!config.dimension.sync);
    }

    #[test]
    fn page_options_mirror_sections() {
        let mut config = WeldConfig::default();
        config.widget.name = "bar".into();
        config.mask.enabled = true;
        config.mask.throttle_ms = 250;
        config.dimension.sync = true;

        let opts = config.page_options();
        assert_eq!(opts.name, "bar");
        assert!(opts.input_mask);
        assert!(opts.sync_dimension);
        assert_eq!(opts.throttle_ms, 250);
        assert_eq!(opts.marker_class, "mask");
    }

    #[test]
    fn blank_runtime_disables_bootstrap() {
        let mut config = WeldConfig::default();
        assert_eq!(config.runtime_module(), Some("weld_page.js"));

        config.widget.runtime = "  ".into();
        assert_eq!(config.runtime_module(), None);
    }

    #[test]
    fn explicit_url_wins() {
        let mut config = WeldConfig::default();
        config.widget.url = Some("http://localhost:5173".into());
        assert_eq!(config.entry_url().unwrap(), "http://localhost:5173");
    }

    #[test]
    fn default_url_points_into_widget_dir() {
        let mut config = WeldConfig::default();
        config.widget.name = "clock".into();
        // Needs a resolvable config dir.
        if let Ok(url) = config.entry_url() {
            assert!(url.starts_with("file://"));
            assert!(url.ends_with("clock/index.html") || url.ends_with("clock\\index.html"));
        }
    }
}
