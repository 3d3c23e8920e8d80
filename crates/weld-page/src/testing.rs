//! In-memory page and recording bridge.
//!
//! `FakePage` models just enough of a document for the page components:
//! a node tree with classes and boxes, observers, a frame queue and a
//! manual clock. Observer delivery is explicit so tests control ordering:
//! resize, attribute and hover callbacks fire synchronously from the
//! mutating call, child-list records are queued until
//! [`FakePage::flush_mutations`], and frame callbacks run on
//! [`FakePage::run_frame`].

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use weld_common::{Dimensions, HostMessage, MaskRect};

use crate::bridge::HostBridge;
use crate::page::{
    Callback, ChildListCallback, ChildListChange, Hover, HoverCallback, Page, Subscription,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const BODY: NodeId = NodeId(0);

struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    rect: MaskRect,
}

enum Listener {
    Resize {
        node: NodeId,
        callback: Rc<RefCell<Callback>>,
    },
    Attributes {
        node: NodeId,
        filter: Vec<String>,
        callback: Rc<RefCell<Callback>>,
    },
    Hover {
        node: NodeId,
        callback: Rc<RefCell<HoverCallback>>,
    },
    Children {
        root: NodeId,
        callback: Rc<RefCell<ChildListCallback<NodeId>>>,
    },
}

type Listeners = Rc<RefCell<BTreeMap<u64, Listener>>>;

pub struct FakePage {
    nodes: RefCell<Vec<Node>>,
    listeners: Listeners,
    next_listener: Cell<u64>,
    pending_mutations: RefCell<Vec<(NodeId, ChildListChange<NodeId>)>>,
    frames: RefCell<Vec<Box<dyn FnOnce()>>>,
    clock: Cell<Duration>,
    body_size: Cell<Dimensions>,
}

impl FakePage {
    /// A page with an 800x600 body and the clock at 10s.
    pub fn new() -> Self {
        let body = Node {
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            rect: MaskRect::new(0.0, 0.0, 800.0, 600.0),
        };
        Self {
            nodes: RefCell::new(vec![body]),
            listeners: Rc::new(RefCell::new(BTreeMap::new())),
            next_listener: Cell::new(1),
            pending_mutations: RefCell::new(Vec::new()),
            frames: RefCell::new(Vec::new()),
            clock: Cell::new(Duration::from_secs(10)),
            body_size: Cell::new(Dimensions::new(800, 600)),
        }
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    // -- Tree --

    /// Create a detached element.
    pub fn create_element(&self, classes: &[&str], rect: MaskRect) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            parent: None,
            children: Vec::new(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            rect,
        });
        NodeId(nodes.len() - 1)
    }

    /// Move `child` under `parent`, queueing the child-list records.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        self.detach(child);
        {
            let mut nodes = self.nodes.borrow_mut();
            nodes[child.0].parent = Some(parent);
            nodes[parent.0].children.push(child);
        }
        self.pending_mutations.borrow_mut().push((
            parent,
            ChildListChange {
                added: vec![child],
                removed: Vec::new(),
            },
        ));
    }

    /// Create an element and append it in one step.
    pub fn insert(&self, parent: NodeId, classes: &[&str], rect: MaskRect) -> NodeId {
        let id = self.create_element(classes, rect);
        self.append_child(parent, id);
        id
    }

    /// Detach `node` from its parent. Its own subtree stays intact.
    pub fn remove(&self, node: NodeId) {
        self.detach(node);
    }

    fn detach(&self, node: NodeId) {
        let parent = {
            let mut nodes = self.nodes.borrow_mut();
            let Some(parent) = nodes[node.0].parent.take() else {
                return;
            };
            nodes[parent.0].children.retain(|c| *c != node);
            parent
        };
        self.pending_mutations.borrow_mut().push((
            parent,
            ChildListChange {
                added: Vec::new(),
                removed: vec![node],
            },
        ));
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_descendant(node, BODY)
    }

    fn is_inclusive_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = nodes[id.0].parent;
        }
        false
    }

    /// Deliver queued child-list records to the observers watching them.
    pub fn flush_mutations(&self) {
        let records = std::mem::take(&mut *self.pending_mutations.borrow_mut());
        if records.is_empty() {
            return;
        }
        let observers = self.collect(|l| match l {
            Listener::Children { root, callback } => Some((*root, Rc::clone(callback))),
            _ => None,
        });
        for (id, (root, callback)) in observers {
            let batch: Vec<_> = records
                .iter()
                .filter(|(target, _)| self.is_inclusive_descendant(*target, root))
                .map(|(_, change)| change.clone())
                .collect();
            if !batch.is_empty() && self.is_live(id) {
                (&mut *callback.borrow_mut())(batch);
            }
        }
    }

    // -- Geometry and attributes --

    /// Change an element's box. Resize observers fire only when the size
    /// changes; a pure move is visible to frame polling alone.
    pub fn set_rect(&self, node: NodeId, rect: MaskRect) {
        let resized = {
            let mut nodes = self.nodes.borrow_mut();
            let old = std::mem::replace(&mut nodes[node.0].rect, rect);
            old.width != rect.width || old.height != rect.height
        };
        if resized {
            self.fire_resize(node);
        }
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        self.nodes.borrow_mut()[node.0].classes.push(class.to_string());
        self.fire_attribute(node, "class");
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        self.nodes.borrow_mut()[node.0].classes.retain(|c| c != class);
        self.fire_attribute(node, "class");
    }

    /// Change an element's box through its `style` attribute.
    pub fn set_style(&self, node: NodeId, rect: MaskRect) {
        self.nodes.borrow_mut()[node.0].rect = rect;
        self.fire_attribute(node, "style");
    }

    pub fn set_body_size(&self, dimensions: Dimensions) {
        self.body_size.set(dimensions);
        self.fire_resize(BODY);
    }

    // -- Pointer --

    pub fn pointer_enter(&self, node: NodeId) {
        self.fire_hover(node, Hover::Enter);
    }

    pub fn pointer_leave(&self, node: NodeId) {
        self.fire_hover(node, Hover::Leave);
    }

    // -- Time --

    pub fn advance(&self, by: Duration) {
        self.clock.set(self.clock.get() + by);
    }

    /// Run every frame callback queued before this call. Callbacks queued
    /// while running wait for the next frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        for frame in frames {
            frame();
        }
        count
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    // -- Introspection --

    /// Live resize, attribute and hover registrations on `node`.
    pub fn observer_count(&self, node: NodeId) -> usize {
        self.listeners
            .borrow()
            .values()
            .filter(|l| match l {
                Listener::Resize { node: n, .. }
                | Listener::Attributes { node: n, .. }
                | Listener::Hover { node: n, .. } => *n == node,
                Listener::Children { .. } => false,
            })
            .count()
    }

    /// Live child-list registrations.
    pub fn structural_observer_count(&self) -> usize {
        self.listeners
            .borrow()
            .values()
            .filter(|l| matches!(l, Listener::Children { .. }))
            .count()
    }

    // -- Dispatch --

    fn register(&self, listener: Listener) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().insert(id, listener);
        let weak = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.borrow_mut().remove(&id);
            }
        })
    }

    fn collect<T>(&self, select: impl Fn(&Listener) -> Option<T>) -> Vec<(u64, T)> {
        self.listeners
            .borrow()
            .iter()
            .filter_map(|(id, l)| select(l).map(|t| (*id, t)))
            .collect()
    }

    /// A callback released by an earlier callback in the same dispatch
    /// must not run.
    fn is_live(&self, id: u64) -> bool {
        self.listeners.borrow().contains_key(&id)
    }

    fn fire_resize(&self, node: NodeId) {
        let targets = self.collect(|l| match l {
            Listener::Resize { node: n, callback } if *n == node => Some(Rc::clone(callback)),
            _ => None,
        });
        for (id, callback) in targets {
            if self.is_live(id) {
                (&mut *callback.borrow_mut())();
            }
        }
    }

    fn fire_attribute(&self, node: NodeId, attribute: &str) {
        let targets = self.collect(|l| match l {
            Listener::Attributes {
                node: n,
                filter,
                callback,
            } if *n == node && filter.iter().any(|a| a == attribute) => Some(Rc::clone(callback)),
            _ => None,
        });
        for (id, callback) in targets {
            if self.is_live(id) {
                (&mut *callback.borrow_mut())();
            }
        }
    }

    fn fire_hover(&self, node: NodeId, hover: Hover) {
        let targets = self.collect(|l| match l {
            Listener::Hover { node: n, callback } if *n == node => Some(Rc::clone(callback)),
            _ => None,
        });
        for (id, callback) in targets {
            if self.is_live(id) {
                (&mut *callback.borrow_mut())(hover);
            }
        }
    }
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for FakePage {
    type Element = NodeId;

    fn body(&self) -> NodeId {
        BODY
    }

    fn bounding_rect(&self, element: &NodeId) -> MaskRect {
        if self.is_connected(*element) {
            self.nodes.borrow()[element.0].rect
        } else {
            MaskRect::default()
        }
    }

    fn body_dimensions(&self) -> Dimensions {
        self.body_size.get()
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[element.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn marked_descendants(&self, root: &NodeId, class: &str) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &nodes[id.0];
            if node.classes.iter().any(|c| c == class) {
                found.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    fn observe_resize(&self, element: &NodeId, callback: Callback) -> Subscription {
        self.register(Listener::Resize {
            node: *element,
            callback: Rc::new(RefCell::new(callback)),
        })
    }

    fn observe_attributes(
        &self,
        element: &NodeId,
        attributes: &[&str],
        callback: Callback,
    ) -> Subscription {
        self.register(Listener::Attributes {
            node: *element,
            filter: attributes.iter().map(|a| a.to_string()).collect(),
            callback: Rc::new(RefCell::new(callback)),
        })
    }

    fn observe_hover(&self, element: &NodeId, callback: HoverCallback) -> Subscription {
        self.register(Listener::Hover {
            node: *element,
            callback: Rc::new(RefCell::new(callback)),
        })
    }

    fn observe_children(
        &self,
        root: &NodeId,
        callback: ChildListCallback<NodeId>,
    ) -> Subscription {
        self.register(Listener::Children {
            root: *root,
            callback: Rc::new(RefCell::new(callback)),
        })
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        self.frames.borrow_mut().push(callback);
    }

    fn now(&self) -> Duration {
        self.clock.get()
    }
}

/// Bridge that keeps every message it is given.
#[derive(Default)]
pub struct RecordingBridge {
    messages: RefCell<Vec<HostMessage>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<HostMessage> {
        self.messages.borrow().clone()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<HostMessage> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }

    /// The `masks` of every recorded `inputMask` message, in order.
    pub fn mask_snapshots(&self) -> Vec<Vec<MaskRect>> {
        self.messages
            .borrow()
            .iter()
            .filter_map(|m| match m {
                HostMessage::InputMask { masks } => Some(masks.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl HostBridge for RecordingBridge {
    fn notify(&self, message: &HostMessage) {
        self.messages.borrow_mut().push(message.clone());
    }
}
