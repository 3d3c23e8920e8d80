use wry::WebView;

/// A live widget webview.
pub struct WidgetHandle {
    pub(super) webview: WebView,
    pub(super) name: String,
    pub(super) url: String,
}

impl WidgetHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set the webview bounds within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }
}
