//! Reports the body box size to the host.

use std::rc::Rc;

use tracing::debug;
use weld_common::HostMessage;

use crate::bridge::HostBridge;
use crate::page::{Page, Subscription};

/// Holds the page strongly; the resize callback only has a `Weak` to it.
pub struct DimensionReporter<P: Page> {
    page: Rc<P>,
    subscription: Option<Subscription>,
}

impl<P: Page> DimensionReporter<P> {
    /// Send the current body size now and again after every body resize.
    pub fn activate<B: HostBridge>(page: Rc<P>, bridge: Rc<B>) -> Self {
        report(&*page, &*bridge);

        let weak = Rc::downgrade(&page);
        let body = page.body();
        let subscription = page.observe_resize(
            &body,
            Box::new(move || {
                if let Some(page) = weak.upgrade() {
                    report(&*page, &*bridge);
                }
            }),
        );

        Self {
            page,
            subscription: Some(subscription),
        }
    }

    pub fn page(&self) -> &Rc<P> {
        &self.page
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn deactivate(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.disconnect();
        }
    }
}

fn report<P: Page, B: HostBridge>(page: &P, bridge: &B) {
    let dimensions = page.body_dimensions();
    debug!(
        width = dimensions.width,
        height = dimensions.height,
        "syncing dimensions"
    );
    bridge.notify(&HostMessage::sync_dimension(dimensions));
}
