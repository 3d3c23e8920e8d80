//! Widget event types.

use serde::{Deserialize, Serialize};
use weld_common::HostMessage;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by a widget webview, drained on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    PageLoad {
        widget: String,
        state: PageLoadState,
        url: String,
    },
    /// A bridge message addressed to this widget.
    Message {
        widget: String,
        message: HostMessage,
    },
    Closed {
        widget: String,
    },
}
