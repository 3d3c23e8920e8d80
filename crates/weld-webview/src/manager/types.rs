use weld_common::PageOptions;

/// Configuration for creating a widget webview.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub url: String,
    /// Whether the webview background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Injected as `window.weldOptions`; its `name` addresses bridge
    /// messages.
    pub options: PageOptions,
    /// Page runtime module imported by the init script.
    pub runtime: Option<String>,
}

impl WidgetConfig {
    pub fn new(url: impl Into<String>, options: PageOptions) -> Self {
        Self {
            url: url.into(),
            transparent: true,
            devtools: cfg!(debug_assertions),
            options,
            runtime: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }
}
