use std::sync::{Arc, Mutex};

use tracing::{debug, warn};
use weld_common::{BridgeError, Envelope, HostMessage};
use wry::WebViewBuilder;

use crate::events::{PageLoadState, WidgetEvent};

use super::WidgetManager;

/// Decode an IPC body and keep it only if it is addressed to `widget`.
pub fn route_ipc(widget: &str, body: &str) -> Option<HostMessage> {
    match Envelope::from_json(body).and_then(|envelope| envelope.addressed_to(widget)) {
        Ok(message) => {
            debug!(widget, kind = message.kind(), "bridge message");
            Some(message)
        }
        Err(e @ BridgeError::WrongWidget { .. }) => {
            debug!(widget, "{e}");
            None
        }
        Err(e) => {
            warn!(
                widget,
                body_len = body.len(),
                "IPC message rejected: {e}"
            );
            None
        }
    }
}

impl WidgetManager {
    pub(super) fn attach_ipc_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WidgetEvent>>>,
        widget: String,
    ) -> WebViewBuilder<'a> {
        builder.with_ipc_handler(move |request| {
            let Some(message) = route_ipc(&widget, request.body()) else {
                return;
            };
            if let Ok(mut evts) = events.lock() {
                evts.push(WidgetEvent::Message {
                    widget: widget.clone(),
                    message,
                });
            }
        })
    }

    pub(super) fn attach_page_load_handler<'a>(
        builder: WebViewBuilder<'a>,
        events: Arc<Mutex<Vec<WidgetEvent>>>,
        widget: String,
    ) -> WebViewBuilder<'a> {
        builder.with_on_page_load_handler(move |event, url| {
            let state = PageLoadState::from(event);
            debug!(widget = %widget, ?state, url = %url, "page load");
            if let Ok(mut evts) = events.lock() {
                evts.push(WidgetEvent::PageLoad {
                    widget: widget.clone(),
                    state,
                    url,
                });
            }
        })
    }
}
