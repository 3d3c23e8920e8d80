use std::sync::Arc;

use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::bridge::init_script;

use super::handle::WidgetHandle;
use super::types::WidgetConfig;
use super::WidgetManager;

impl WidgetManager {
    /// Create a widget webview as a child of `window`, covering `bounds`.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: WidgetConfig,
    ) -> Result<WidgetHandle, wry::Error> {
        let name = config.name().to_string();
        let script = init_script(&config.options, config.runtime.as_deref());

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_initialization_script(&script)
            .with_url(&config.url);

        builder = Self::attach_ipc_handler(builder, Arc::clone(&self.events), name.clone());
        builder = Self::attach_page_load_handler(builder, Arc::clone(&self.events), name.clone());

        let webview = builder.build_as_child(window)?;

        debug!(widget = %name, url = %config.url, "widget webview created");

        Ok(WidgetHandle {
            webview,
            name,
            url: config.url,
        })
    }
}
