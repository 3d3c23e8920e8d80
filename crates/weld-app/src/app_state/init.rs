//! Window and widget webview creation.

use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use weld_webview::WidgetConfig;

use super::core::WeldApp;

/// Webview bounds covering the whole inner area of the window.
pub(super) fn full_bounds(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}

impl WeldApp {
    /// Create the widget window and its webview.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let widget = &self.config.widget;
        let attrs = WindowAttributes::default()
            .with_title(widget.name.clone())
            .with_transparent(widget.transparent)
            .with_decorations(false)
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(widget.width),
                f64::from(widget.height),
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        let url = match self.config.entry_url() {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Failed to resolve widget page: {e}");
                return false;
            }
        };

        let mut widget_config = WidgetConfig::new(url, self.config.page_options());
        widget_config.transparent = widget.transparent;
        widget_config.devtools |= widget.devtools;
        widget_config.runtime = self.config.runtime_module().map(str::to_string);

        let bounds = full_bounds(window.inner_size());
        match self.widgets.create(window.as_ref(), bounds, widget_config) {
            Ok(handle) => {
                if self.config.widget.devtools {
                    handle.open_devtools();
                }
                tracing::info!(widget = %handle.name(), url = %handle.url(), "Widget webview ready");
                self.webview = Some(handle);
            }
            Err(e) => {
                tracing::error!("Failed to create webview: {e}");
                return false;
            }
        }

        self.window = Some(window);
        if let Some(shape) = self.input.current_shape() {
            self.apply_input_shape(shape);
        }
        true
    }

    /// Keep the webview covering the window after a resize.
    pub(super) fn sync_webview_bounds(&self, size: PhysicalSize<u32>) {
        if let Some(handle) = &self.webview {
            if let Err(e) = handle.set_bounds(full_bounds(size)) {
                tracing::warn!("Failed to resize webview: {e}");
            }
        }
    }
}
