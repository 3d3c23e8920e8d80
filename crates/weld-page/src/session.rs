//! Starts the page components a widget asked for.

use std::rc::Rc;

use tracing::info;
use weld_common::PageOptions;

use crate::bridge::HostBridge;
use crate::dimension::DimensionReporter;
use crate::page::Page;
use crate::tracker::{MaskTracker, TrackerOptions};
use crate::watcher::StructuralWatcher;

pub struct PageSession<P: Page, B: HostBridge> {
    masks: Option<StructuralWatcher<P, B>>,
    dimensions: Option<DimensionReporter<P>>,
}

impl<P: Page, B: HostBridge> PageSession<P, B> {
    pub fn start(page: Rc<P>, bridge: Rc<B>, options: &PageOptions) -> Self {
        let masks = options.input_mask.then(|| {
            let tracker = MaskTracker::new(
                Rc::clone(&page),
                Rc::clone(&bridge),
                TrackerOptions::from(options),
            );
            let root = page.body();
            StructuralWatcher::activate(tracker, root)
        });

        let dimensions = options
            .sync_dimension
            .then(|| DimensionReporter::activate(Rc::clone(&page), Rc::clone(&bridge)));

        info!(
            widget = %options.name,
            input_mask = options.input_mask,
            sync_dimension = options.sync_dimension,
            "page session started"
        );

        Self { masks, dimensions }
    }

    pub fn tracker(&self) -> Option<&MaskTracker<P, B>> {
        self.masks.as_ref().map(StructuralWatcher::tracker)
    }

    pub fn is_syncing_dimensions(&self) -> bool {
        self.dimensions.as_ref().is_some_and(DimensionReporter::is_active)
    }

    /// Tear down every running component.
    pub fn stop(&mut self) {
        if let Some(mut watcher) = self.masks.take() {
            watcher.cleanup();
        }
        if let Some(mut reporter) = self.dimensions.take() {
            reporter.deactivate();
        }
        info!("page session stopped");
    }
}
