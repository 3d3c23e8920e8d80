//! Registry of masked elements and the notification loop.
//!
//! Each tracked element is checked for geometry changes from three sources:
//! a resize observer, an attribute observer (`style`, `class`) and a
//! per-frame poll that catches transform-only moves neither observer sees.
//! Any change schedules an `inputMask` snapshot through a leading-edge
//! throttle.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, trace};
use weld_common::{HostMessage, MaskRect, PageOptions};

use crate::bridge::HostBridge;
use crate::page::{Hover, Page, Subscription};
use crate::throttle::Throttle;

#[cfg(test)]
mod tests;

/// Attributes whose mutation triggers a geometry check.
pub const WATCHED_ATTRIBUTES: &[&str] = &["style", "class"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerOptions {
    pub marker_class: String,
    pub throttle: Duration,
    pub poll: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self::from(&PageOptions::default())
    }
}

impl From<&PageOptions> for TrackerOptions {
    fn from(opts: &PageOptions) -> Self {
        Self {
            marker_class: opts.marker_class.clone(),
            throttle: Duration::from_millis(opts.throttle_ms),
            poll: opts.poll,
        }
    }
}

/// Subscriptions owned by one registry entry. Any of them may be missing.
#[derive(Default)]
struct ObserverHandles {
    resize: Option<Subscription>,
    attributes: Option<Subscription>,
    hover: Option<Subscription>,
}

impl ObserverHandles {
    fn release(&mut self) {
        let subs = [
            self.resize.take(),
            self.attributes.take(),
            self.hover.take(),
        ];
        for sub in subs.into_iter().flatten() {
            sub.disconnect();
        }
    }
}

struct Entry<E> {
    element: E,
    rect: MaskRect,
    handles: ObserverHandles,
    /// Cleared on untrack; the poll loop checks it before every tick.
    polling: Rc<Cell<bool>>,
}

struct Inner<P: Page, B> {
    page: Rc<P>,
    bridge: Rc<B>,
    options: TrackerOptions,
    entries: RefCell<Vec<Entry<P::Element>>>,
    throttle: RefCell<Throttle>,
    /// Set when a track went unreported because of the throttle.
    membership_changed: Cell<bool>,
}

/// Tracks masked elements and reports their boxes to the host.
///
/// Cheap to clone; clones share one registry.
pub struct MaskTracker<P: Page, B: HostBridge> {
    inner: Rc<Inner<P, B>>,
}

impl<P: Page, B: HostBridge> Clone for MaskTracker<P, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P: Page, B: HostBridge> MaskTracker<P, B> {
    pub fn new(page: Rc<P>, bridge: Rc<B>, options: TrackerOptions) -> Self {
        let throttle = Throttle::new(options.throttle);
        Self {
            inner: Rc::new(Inner {
                page,
                bridge,
                options,
                entries: RefCell::new(Vec::new()),
                throttle: RefCell::new(throttle),
                membership_changed: Cell::new(false),
            }),
        }
    }

    pub fn page(&self) -> &Rc<P> {
        &self.inner.page
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.inner.options
    }

    /// Start tracking `element`. No-op if it is already tracked.
    pub fn track(&self, element: P::Element) {
        if self.is_tracked(&element) {
            return;
        }

        let inner = &self.inner;
        let rect = inner.page.bounding_rect(&element);
        let handles = install_observers(inner, &element);
        let polling = Rc::new(Cell::new(true));

        inner.entries.borrow_mut().push(Entry {
            element: element.clone(),
            rect,
            handles,
            polling: Rc::clone(&polling),
        });

        if inner.options.poll {
            schedule_poll(inner, element, polling);
        }

        debug!(tracked = self.len(), rect = %rect, "mask element tracked");
        inner.membership_changed.set(true);
        inner.notify_host();
    }

    /// Stop tracking `element` and send a fresh snapshot right away,
    /// bypassing the throttle. No-op if it is not tracked.
    pub fn untrack(&self, element: &P::Element) {
        let removed = {
            let mut entries = self.inner.entries.borrow_mut();
            entries
                .iter()
                .position(|e| &e.element == element)
                .map(|i| entries.remove(i))
        };
        let Some(mut entry) = removed else {
            return;
        };

        entry.polling.set(false);
        entry.handles.release();

        debug!(tracked = self.len(), "mask element untracked");
        self.inner.flush();
    }

    /// Untrack every element, in registry order.
    pub fn untrack_all(&self) {
        for element in self.tracked_elements() {
            self.untrack(&element);
        }
    }

    pub fn is_tracked(&self, element: &P::Element) -> bool {
        self.inner
            .entries
            .borrow()
            .iter()
            .any(|e| &e.element == element)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.borrow().is_empty()
    }

    /// Tracked elements in registry order.
    pub fn tracked_elements(&self) -> Vec<P::Element> {
        self.inner
            .entries
            .borrow()
            .iter()
            .map(|e| e.element.clone())
            .collect()
    }

    /// Current non-empty boxes of every tracked element, in registry order.
    pub fn snapshot(&self) -> Vec<MaskRect> {
        self.inner.snapshot()
    }

    /// Send a snapshot unless one went out less than the throttle interval
    /// ago.
    pub fn notify_host(&self) {
        self.inner.notify_host();
    }

    /// Send a snapshot right away if the tracked set changed since the last
    /// one went out, otherwise behave like [`notify_host`](Self::notify_host).
    pub fn sync_host(&self) {
        if self.inner.membership_changed.get() {
            self.inner.flush();
        } else {
            self.inner.notify_host();
        }
    }

    pub(crate) fn downgrade(&self) -> WeakTracker<P, B> {
        WeakTracker {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning handle for callbacks stored inside the page.
pub(crate) struct WeakTracker<P: Page, B: HostBridge> {
    inner: Weak<Inner<P, B>>,
}

impl<P: Page, B: HostBridge> WeakTracker<P, B> {
    pub(crate) fn upgrade(&self) -> Option<MaskTracker<P, B>> {
        self.inner.upgrade().map(|inner| MaskTracker { inner })
    }
}

impl<P: Page, B: HostBridge> Inner<P, B> {
    /// Compare the element's box with the last one seen; on any difference
    /// store it and notify.
    fn check_element(&self, element: &P::Element) {
        let current = self.page.bounding_rect(element);
        let changed = {
            let mut entries = self.entries.borrow_mut();
            match entries.iter_mut().find(|e| &e.element == element) {
                Some(entry) if entry.rect != current => {
                    entry.rect = current;
                    true
                }
                _ => false,
            }
        };
        if changed {
            trace!(rect = %current, "mask geometry changed");
            self.notify_host();
        }
    }

    fn hover(&self, hover: Hover) {
        let message = match hover {
            Hover::Enter => HostMessage::RemoveInputMask,
            Hover::Leave => HostMessage::ApplyInputMask,
        };
        trace!(?hover, kind = message.kind(), "pointer over mask");
        self.bridge.notify(&message);
    }

    fn notify_host(&self) {
        let now = self.page.now();
        if !self.throttle.borrow_mut().try_fire(now) {
            trace!("input mask update throttled");
            return;
        }
        self.send_snapshot();
    }

    fn flush(&self) {
        let now = self.page.now();
        self.throttle.borrow_mut().force(now);
        self.send_snapshot();
    }

    fn snapshot(&self) -> Vec<MaskRect> {
        let elements: Vec<P::Element> = self
            .entries
            .borrow()
            .iter()
            .map(|e| e.element.clone())
            .collect();
        elements
            .iter()
            .map(|el| self.page.bounding_rect(el))
            .filter(|r| !r.is_empty())
            .collect()
    }

    fn send_snapshot(&self) {
        self.membership_changed.set(false);
        let message = HostMessage::input_mask(self.snapshot());
        if let HostMessage::InputMask { masks } = &message {
            debug!(masks = masks.len(), "sending input mask");
        }
        self.bridge.notify(&message);
    }
}

fn install_observers<P: Page, B: HostBridge>(
    inner: &Rc<Inner<P, B>>,
    element: &P::Element,
) -> ObserverHandles {
    let resize = {
        let weak = Rc::downgrade(inner);
        let el = element.clone();
        inner.page.observe_resize(
            element,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.check_element(&el);
                }
            }),
        )
    };

    let attributes = {
        let weak = Rc::downgrade(inner);
        let el = element.clone();
        inner.page.observe_attributes(
            element,
            WATCHED_ATTRIBUTES,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.check_element(&el);
                }
            }),
        )
    };

    let hover = {
        let weak = Rc::downgrade(inner);
        inner.page.observe_hover(
            element,
            Box::new(move |hover| {
                if let Some(inner) = weak.upgrade() {
                    inner.hover(hover);
                }
            }),
        )
    };

    ObserverHandles {
        resize: Some(resize),
        attributes: Some(attributes),
        hover: Some(hover),
    }
}

/// Queue the next poll tick for `element`. The tick re-queues itself for as
/// long as `polling` stays set and the tracker is alive.
fn schedule_poll<P: Page, B: HostBridge>(
    inner: &Rc<Inner<P, B>>,
    element: P::Element,
    polling: Rc<Cell<bool>>,
) {
    let weak = Rc::downgrade(inner);
    inner.page.request_frame(Box::new(move || {
        if !polling.get() {
            return;
        }
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.check_element(&element);
        if polling.get() {
            schedule_poll(&inner, element, polling);
        }
    }));
}
