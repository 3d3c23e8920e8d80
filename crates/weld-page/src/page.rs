//! The environment seam: everything the page components need from the DOM.

use std::fmt;
use std::time::Duration;

use weld_common::{Dimensions, MaskRect};

/// Callback for observers that carry no payload the components care about.
pub type Callback = Box<dyn FnMut()>;

/// Callback for pointer enter/leave on an element.
pub type HoverCallback = Box<dyn FnMut(Hover)>;

/// Callback for one batch of child-list mutations.
pub type ChildListCallback<E> = Box<dyn FnMut(Vec<ChildListChange<E>>)>;

/// Pointer transition over an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    Enter,
    Leave,
}

/// One child-list mutation record. Only element nodes are reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildListChange<E> {
    pub added: Vec<E>,
    pub removed: Vec<E>,
}

impl<E> Default for ChildListChange<E> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// A page the components can observe.
///
/// Elements are compared by identity (`PartialEq` on the handle), never by
/// value. Callbacks are invoked from the page's event loop, one at a time,
/// and never synchronously from inside the `observe_*` call that registered
/// them.
pub trait Page: 'static {
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    /// The document body, root of the watched subtree.
    fn body(&self) -> Self::Element;

    /// Current viewport-relative bounding box. Detached elements report an
    /// empty box.
    fn bounding_rect(&self, element: &Self::Element) -> MaskRect;

    /// Current size of the body box.
    fn body_dimensions(&self) -> Dimensions;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Every descendant of `root` (excluding `root`) carrying `class`, in
    /// document order. Works on detached subtrees.
    fn marked_descendants(&self, root: &Self::Element, class: &str) -> Vec<Self::Element>;

    /// Notify on box-size changes of `element`.
    fn observe_resize(&self, element: &Self::Element, callback: Callback) -> Subscription;

    /// Notify when any of `attributes` changes on `element`.
    fn observe_attributes(
        &self,
        element: &Self::Element,
        attributes: &[&str],
        callback: Callback,
    ) -> Subscription;

    /// Notify on pointer enter/leave of `element`.
    fn observe_hover(&self, element: &Self::Element, callback: HoverCallback) -> Subscription;

    /// Notify on node insertion/removal anywhere under `root`.
    fn observe_children(
        &self,
        root: &Self::Element,
        callback: ChildListCallback<Self::Element>,
    ) -> Subscription;

    /// Run `callback` once before the next repaint.
    fn request_frame(&self, callback: Box<dyn FnOnce()>);

    /// Monotonic time since page start.
    fn now(&self) -> Duration;
}

/// A live observer registration.
///
/// Released exactly once: either by [`Subscription::disconnect`] or when the
/// handle is dropped.
#[must_use = "dropping a Subscription disconnects it"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release, for observers the
    /// environment failed to create.
    pub fn empty() -> Self {
        Self { release: None }
    }

    pub fn disconnect(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn disconnect_releases_once() {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let sub = Subscription::new(move || c.set(c.get() + 1));
        sub.disconnect();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_releases() {
        let count = Rc::new(Cell::new(0));
        {
            let c = Rc::clone(&count);
            let _sub = Subscription::new(move || c.set(c.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn empty_subscription_is_harmless() {
        let sub = Subscription::empty();
        assert_eq!(format!("{sub:?}"), "Subscription { live: false }");
        sub.disconnect();
    }
}
