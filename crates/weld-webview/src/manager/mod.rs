//! Widget webview lifecycle.
//!
//! `WidgetManager` creates widget webviews and collects the events their
//! handlers produce on webview threads.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::events::WidgetEvent;

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WidgetHandle;
pub use types::WidgetConfig;

pub struct WidgetManager {
    /// Event sink, drained by the event loop.
    pub(crate) events: Arc<Mutex<Vec<WidgetEvent>>>,
}

impl WidgetManager {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WidgetEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// Destroy a widget webview and report it closed.
    pub fn close(&self, handle: WidgetHandle) {
        let widget = handle.name().to_string();
        drop(handle);
        debug!(widget = %widget, "widget webview destroyed");
        if let Ok(mut events) = self.events.lock() {
            events.push(WidgetEvent::Closed { widget });
        }
    }
}

impl Default for WidgetManager {
    fn default() -> Self {
        Self::new()
    }
}
