//! Keeps the tracker's registry in sync with the marker class under a
//! subtree.

use tracing::{debug, info};

use crate::bridge::HostBridge;
use crate::page::{ChildListChange, Page, Subscription};
use crate::tracker::MaskTracker;

pub struct StructuralWatcher<P: Page, B: HostBridge> {
    tracker: MaskTracker<P, B>,
    subscription: Option<Subscription>,
}

impl<P: Page, B: HostBridge> StructuralWatcher<P, B> {
    /// Track every marked element under `root` (and `root` itself), then
    /// follow insertions and removals below it.
    pub fn activate(tracker: MaskTracker<P, B>, root: P::Element) -> Self {
        let page = tracker.page().clone();
        let class = tracker.options().marker_class.clone();

        if page.has_class(&root, &class) {
            tracker.track(root.clone());
        }
        for element in page.marked_descendants(&root, &class) {
            tracker.track(element);
        }
        if !tracker.is_empty() {
            tracker.sync_host();
        }

        let weak = tracker.downgrade();
        let subscription = page.observe_children(
            &root,
            Box::new(move |batch| {
                if let Some(tracker) = weak.upgrade() {
                    apply_batch(&tracker, batch);
                }
            }),
        );

        info!(
            tracked = tracker.len(),
            marker = %class,
            "structural watcher active"
        );

        Self {
            tracker,
            subscription: Some(subscription),
        }
    }

    pub fn tracker(&self) -> &MaskTracker<P, B> {
        &self.tracker
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Full teardown: stop watching the subtree and untrack everything.
    pub fn cleanup(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        subscription.disconnect();
        self.tracker.untrack_all();
        debug!("structural watcher cleaned up");
    }
}

impl<P: Page, B: HostBridge> Drop for StructuralWatcher<P, B> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn apply_batch<P: Page, B: HostBridge>(
    tracker: &MaskTracker<P, B>,
    batch: Vec<ChildListChange<P::Element>>,
) {
    let page = tracker.page().clone();
    let class = tracker.options().marker_class.clone();

    for change in batch {
        for node in change.added {
            if page.has_class(&node, &class) {
                tracker.track(node.clone());
            }
            for element in page.marked_descendants(&node, &class) {
                tracker.track(element);
            }
        }
        for node in change.removed {
            if page.has_class(&node, &class) {
                tracker.untrack(&node);
            }
            for element in page.marked_descendants(&node, &class) {
                if tracker.is_tracked(&element) {
                    tracker.untrack(&element);
                }
            }
        }
    }

    tracker.sync_host();
}
