use serde::{Deserialize, Serialize};

/// Page-side behaviour for one widget.
///
/// The host serializes this into the page as `window.weldOptions`; the page
/// runtime reads it back to decide which components to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageOptions {
    /// Widget name stamped onto every bridge message.
    pub name: String,
    /// Track marked elements and report them as input masks.
    pub input_mask: bool,
    /// Report the body box size to the host.
    pub sync_dimension: bool,
    /// CSS class that marks an element as a mask.
    pub marker_class: String,
    /// Minimum spacing between two `inputMask` snapshots.
    pub throttle_ms: u64,
    /// Check every tracked element once per animation frame.
    pub poll: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            input_mask: false,
            sync_dimension: false,
            marker_class: "mask".into(),
            throttle_ms: 100,
            poll: true,
        }
    }
}
