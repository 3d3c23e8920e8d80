//! Browser backend: the real DOM behind [`Page`] and `window.weld` behind
//! [`HostBridge`].
//!
//! The host injects `window.weld` and `window.weldOptions` before the page
//! loads; the page bundle calls `weldStart()` once its wasm module is ready.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::events::EventListener;
use js_sys::{Array, Function, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, MutationObserver, MutationObserverInit, MutationRecord, NodeList,
    ResizeObserver, Window,
};
use weld_common::{Dimensions, HostMessage, MaskRect, PageOptions};

use crate::bridge::HostBridge;
use crate::page::{
    Callback, ChildListCallback, ChildListChange, Hover, HoverCallback, Page, Subscription,
};
use crate::session::PageSession;

pub struct WebPage {
    window: Window,
    body: HtmlElement,
}

impl WebPage {
    /// `None` when there is no window or the document has no body yet.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let body = window.document()?.body()?;
        Some(Self { window, body })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Page for WebPage {
    type Element = Element;

    fn body(&self) -> Element {
        self.body.clone().into()
    }

    fn bounding_rect(&self, element: &Element) -> MaskRect {
        let r = element.get_bounding_client_rect();
        MaskRect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn body_dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.body.offset_width().max(0) as u32,
            self.body.offset_height().max(0) as u32,
        )
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn marked_descendants(&self, root: &Element, class: &str) -> Vec<Element> {
        match root.query_selector_all(&format!(".{class}")) {
            Ok(list) => elements(&list),
            Err(err) => {
                warn!(class, error = ?err, "marker selector rejected");
                Vec::new()
            }
        }
    }

    fn observe_resize(&self, element: &Element, callback: Callback) -> Subscription {
        let closure = Closure::wrap(callback);
        let observer = match ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(o) => o,
            Err(err) => {
                warn!(error = ?err, "ResizeObserver unavailable");
                return Subscription::empty();
            }
        };
        observer.observe(element);
        Subscription::new(move || {
            observer.disconnect();
            drop(closure);
        })
    }

    fn observe_attributes(
        &self,
        element: &Element,
        attributes: &[&str],
        callback: Callback,
    ) -> Subscription {
        let closure = Closure::wrap(callback);
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        let filter: Array = attributes.iter().map(|a| JsValue::from_str(a)).collect();
        init.set_attribute_filter(&filter);
        observe_mutations(element, closure, &init)
    }

    fn observe_hover(&self, element: &Element, callback: HoverCallback) -> Subscription {
        let callback = Rc::new(RefCell::new(callback));
        let enter = {
            let cb = Rc::clone(&callback);
            EventListener::new(element, "mouseenter", move |_| {
                (&mut *cb.borrow_mut())(Hover::Enter)
            })
        };
        let leave = {
            let cb = Rc::clone(&callback);
            EventListener::new(element, "mouseleave", move |_| {
                (&mut *cb.borrow_mut())(Hover::Leave)
            })
        };
        Subscription::new(move || drop((enter, leave)))
    }

    fn observe_children(
        &self,
        root: &Element,
        mut callback: ChildListCallback<Element>,
    ) -> Subscription {
        let closure = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |records: Array, _observer: MutationObserver| {
                let batch = records
                    .iter()
                    .filter_map(|r| r.dyn_into::<MutationRecord>().ok())
                    .map(|r| ChildListChange {
                        added: elements(&r.added_nodes()),
                        removed: elements(&r.removed_nodes()),
                    })
                    .collect();
                callback(batch);
            },
        );
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observe_mutations(root, closure, &init)
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(move || callback());
        if let Err(err) = self.window.request_animation_frame(closure.unchecked_ref()) {
            warn!(error = ?err, "requestAnimationFrame failed");
        }
    }

    fn now(&self) -> Duration {
        let ms = self
            .window
            .performance()
            .map(|p| p.now())
            .unwrap_or_default();
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }
}

fn observe_mutations<T: ?Sized + 'static>(
    target: &Element,
    closure: Closure<T>,
    init: &MutationObserverInit,
) -> Subscription {
    let observer = match MutationObserver::new(closure.as_ref().unchecked_ref()) {
        Ok(o) => o,
        Err(err) => {
            warn!(error = ?err, "MutationObserver unavailable");
            return Subscription::empty();
        }
    };
    if let Err(err) = observer.observe_with_options(target, init) {
        warn!(error = ?err, "MutationObserver.observe failed");
        return Subscription::empty();
    }
    Subscription::new(move || {
        observer.disconnect();
        drop(closure);
    })
}

/// Element nodes of a node list; text and comment nodes are skipped.
fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Calls the host-installed `window.weld(message)`.
pub struct WindowBridge {
    window: Window,
}

impl WindowBridge {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn post(&self, message: &HostMessage) -> Result<(), JsValue> {
        let weld: Function = Reflect::get(&self.window, &JsValue::from_str("weld"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("window.weld is not a function"))?;
        let payload = js_sys::JSON::parse(&message.to_json())?;
        weld.call1(&self.window, &payload)?;
        Ok(())
    }
}

impl HostBridge for WindowBridge {
    fn notify(&self, message: &HostMessage) {
        if let Err(err) = self.post(message) {
            warn!(kind = message.kind(), error = ?err, "weld bridge call failed");
        }
    }
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

thread_local! {
    static SESSION: RefCell<Option<PageSession<WebPage, WindowBridge>>> =
        const { RefCell::new(None) };
}

/// Start the page components. `options` falls back to `window.weldOptions`
/// when `undefined` or `null`. Restarting stops the previous session first.
#[wasm_bindgen(js_name = weldStart)]
pub fn start(options: JsValue) -> Result<(), JsValue> {
    stop();

    let page = WebPage::new().ok_or_else(|| JsValue::from_str("document has no body"))?;
    let options = if options.is_undefined() || options.is_null() {
        Reflect::get(page.window(), &JsValue::from_str("weldOptions"))?
    } else {
        options
    };
    let options = read_options(&options);
    let bridge = WindowBridge::new(page.window().clone());

    let session = PageSession::start(Rc::new(page), Rc::new(bridge), &options);
    SESSION.with(|slot| *slot.borrow_mut() = Some(session));
    Ok(())
}

/// Tear down the running session, if any.
#[wasm_bindgen(js_name = weldStop)]
pub fn stop() {
    let previous = SESSION.with(|slot| slot.borrow_mut().take());
    if let Some(mut session) = previous {
        session.stop();
    }
}

fn read_options(value: &JsValue) -> PageOptions {
    if value.is_undefined() || value.is_null() {
        debug!("no weld options supplied, using defaults");
        return PageOptions::default();
    }
    let json: Option<String> = js_sys::JSON::stringify(value).ok().map(String::from);
    match json.as_deref().map(serde_json::from_str::<PageOptions>) {
        Some(Ok(options)) => options,
        Some(Err(err)) => {
            warn!(error = %err, "invalid weld options, using defaults");
            PageOptions::default()
        }
        None => PageOptions::default(),
    }
}
