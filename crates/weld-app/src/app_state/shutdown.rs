//! Graceful shutdown: destroy the webview before its window.

use super::core::WeldApp;

impl WeldApp {
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(handle) = self.webview.take() {
            self.widgets.close(handle);
        }
        self.window = None;

        tracing::info!("Graceful shutdown complete");
    }
}
