//! Drains widget events and applies the host actions they produce.

use std::time::{Duration, Instant};

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use weld_webview::{HostAction, InputShape, PageLoadState, WidgetEvent};

use super::core::WeldApp;

const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Whether the window should take pointer input at all.
///
/// winit can only toggle hit-testing for the whole window, so any region
/// makes the whole window interactive and an empty shape passes everything
/// through.
pub(super) fn hit_test_for(shape: &InputShape) -> bool {
    !shape.is_passthrough()
}

impl WeldApp {
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_widget_events();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn poll_widget_events(&mut self) {
        for event in self.widgets.drain_events() {
            self.handle_widget_event(event);
        }
    }

    pub(super) fn handle_widget_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::Message { widget, message } => {
                tracing::debug!(widget = %widget, kind = message.kind(), "Bridge message");
                if let Some(action) = self.input.apply(&message) {
                    self.apply_action(action);
                }
            }
            WidgetEvent::PageLoad {
                widget,
                state: PageLoadState::Finished,
                url,
            } => {
                tracing::info!(widget = %widget, url = %url, "Widget page loaded");
            }
            WidgetEvent::PageLoad { .. } => {}
            WidgetEvent::Closed { widget } => {
                tracing::info!(widget = %widget, "Widget closed");
                self.should_exit = true;
            }
        }
    }

    fn apply_action(&mut self, action: HostAction) {
        match action {
            HostAction::SetInputShape(shape) => self.apply_input_shape(shape),
            HostAction::RequestSize { width, height } => {
                tracing::debug!(width, height, "Syncing window size");
                if let Some(window) = &self.window {
                    let _ = window.request_inner_size(winit::dpi::LogicalSize::new(
                        f64::from(width),
                        f64::from(height),
                    ));
                }
            }
            HostAction::Close => {
                tracing::info!("Widget page asked to close");
                match self.webview.take() {
                    Some(handle) => self.widgets.close(handle),
                    None => self.should_exit = true,
                }
            }
        }
    }

    pub(super) fn apply_input_shape(&mut self, shape: InputShape) {
        let hit_test = hit_test_for(&shape);
        tracing::debug!(%shape, hit_test, "Input shape changed");
        if hit_test == self.hit_test {
            return;
        }
        let Some(window) = &self.window else {
            return;
        };
        match window.set_cursor_hittest(hit_test) {
            Ok(()) => self.hit_test = hit_test,
            Err(e) => tracing::warn!("Failed to set cursor hit-testing: {e}"),
        }
    }
}
