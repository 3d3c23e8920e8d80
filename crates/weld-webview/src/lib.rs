//! Host side of a weld widget.
//!
//! Wraps `wry` to provide:
//! - One managed webview per widget window
//! - The injected `window.weld` bridge and `window.weldOptions`
//! - Decoding of bridge messages addressed to the widget
//! - The input-shape state driven by mask messages
//!
//! The page bundle starts its runtime (`weldStart()`) once loaded; the host
//! only provides the bridge and options it reads.

pub mod bridge;
pub mod events;
pub mod input_mask;
pub mod manager;

pub use events::{PageLoadState, WidgetEvent};
pub use input_mask::{HostAction, InputMaskState, InputShape, IntRect};
pub use manager::{WidgetConfig, WidgetHandle, WidgetManager};
