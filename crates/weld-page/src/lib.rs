//! Page-side geometry sync for weld widgets.
//!
//! Runs inside the widget's web page and reports to the host through the
//! single `weld` bridge call:
//! - [`MaskTracker`]: registry of masked elements, change detection,
//!   throttled `inputMask` snapshots and hover messages
//! - [`StructuralWatcher`]: keeps the registry in sync with the marker class
//!   under a subtree
//! - [`DimensionReporter`]: reports the body box size
//!
//! The environment (layout queries, observers, frame scheduling) sits behind
//! the [`Page`] trait so the same logic runs against the browser DOM
//! (`web` feature, wasm32) or the in-memory page used by tests.

pub mod bridge;
pub mod dimension;
pub mod page;
pub mod session;
pub mod throttle;
pub mod tracker;
pub mod watcher;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use bridge::HostBridge;
pub use dimension::DimensionReporter;
pub use page::{ChildListChange, Hover, Page, Subscription};
pub use session::PageSession;
pub use throttle::Throttle;
pub use tracker::{MaskTracker, TrackerOptions};
pub use watcher::StructuralWatcher;
