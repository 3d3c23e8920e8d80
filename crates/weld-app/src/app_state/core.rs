//! WeldApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use winit::window::Window;

use weld_config::WeldConfig;
use weld_webview::{InputMaskState, WidgetHandle, WidgetManager};

/// Top-level application state.
pub struct WeldApp {
    pub(super) config: WeldConfig,

    pub(super) window: Option<Arc<Window>>,
    pub(super) widgets: WidgetManager,
    pub(super) webview: Option<WidgetHandle>,

    /// Host side of the mask protocol.
    pub(super) input: InputMaskState,
    /// Last value passed to `set_cursor_hittest`.
    pub(super) hit_test: bool,

    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl WeldApp {
    pub fn new(config: WeldConfig) -> Self {
        let input = InputMaskState::new(config.mask.enabled);
        Self {
            config,
            window: None,
            widgets: WidgetManager::new(),
            webview: None,
            input,
            hit_test: true,
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
