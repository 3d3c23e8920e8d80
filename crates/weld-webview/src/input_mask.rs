//! Which parts of the widget window accept pointer input.
//!
//! Outside the input shape, clicks fall through to whatever is below the
//! window. Mask messages from the page drive the shape:
//!
//! | message           | effect                                        |
//! |-------------------|-----------------------------------------------|
//! | `inputMask`       | store regions; reshape if masking is active   |
//! | `applyInputMask`  | masking on, shape = stored regions            |
//! | `removeInputMask` | masking off, whole window accepts input       |
//! | `syncDimension`   | request the window's inner size               |
//! | `close`           | tear the widget down                          |
//!
//! The window keeps its native shape until the first mask message arrives.

use std::fmt;

use tracing::debug;
use weld_common::{HostMessage, MaskRect};

/// A mask rectangle in whole window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= f64::from(self.x)
            && y >= f64::from(self.y)
            && x < f64::from(self.x) + f64::from(self.width)
            && y < f64::from(self.y) + f64::from(self.height)
    }
}

/// Fractional page pixels are truncated toward zero.
impl From<MaskRect> for IntRect {
    fn from(r: MaskRect) -> Self {
        Self {
            x: r.left as i32,
            y: r.top as i32,
            width: r.width as i32,
            height: r.height as i32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputShape {
    /// The whole window accepts input.
    Full,
    /// Only these regions accept input; empty means full passthrough.
    Regions(Vec<IntRect>),
}

impl InputShape {
    pub fn accepts(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Full => true,
            Self::Regions(regions) => regions.iter().any(|r| r.contains(x, y)),
        }
    }

    /// No point of the window accepts input.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, Self::Regions(regions) if regions.is_empty())
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Regions(regions) => write!(f, "{} region(s)", regions.len()),
        }
    }
}

/// What the window owner should do after a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    SetInputShape(InputShape),
    RequestSize { width: u32, height: u32 },
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct InputMaskState {
    masking: bool,
    regions: Vec<IntRect>,
    /// Whether any mask message has been applied yet.
    engaged: bool,
}

impl InputMaskState {
    /// `masking` is whether the widget starts with passthrough enabled.
    pub fn new(masking: bool) -> Self {
        Self {
            masking,
            regions: Vec::new(),
            engaged: false,
        }
    }

    pub fn is_masking(&self) -> bool {
        self.masking
    }

    pub fn regions(&self) -> &[IntRect] {
        &self.regions
    }

    pub fn shape(&self) -> InputShape {
        if self.masking {
            InputShape::Regions(self.regions.clone())
        } else {
            InputShape::Full
        }
    }

    /// The shape to restore on a new window, `None` until the page has sent
    /// any mask message.
    pub fn current_shape(&self) -> Option<InputShape> {
        self.engaged.then(|| self.shape())
    }

    pub fn apply(&mut self, message: &HostMessage) -> Option<HostAction> {
        if matches!(
            message,
            HostMessage::InputMask { .. }
                | HostMessage::ApplyInputMask
                | HostMessage::RemoveInputMask
        ) {
            self.engaged = true;
        }
        match message {
            HostMessage::InputMask { masks } => {
                self.regions = masks.iter().copied().map(IntRect::from).collect();
                debug!(masks = self.regions.len(), masking = self.masking, "input mask updated");
                self.masking.then(|| HostAction::SetInputShape(self.shape()))
            }
            HostMessage::ApplyInputMask => {
                self.masking = true;
                Some(HostAction::SetInputShape(self.shape()))
            }
            HostMessage::RemoveInputMask => {
                self.masking = false;
                Some(HostAction::SetInputShape(InputShape::Full))
            }
            HostMessage::SyncDimension { height, width } => Some(HostAction::RequestSize {
                width: *width,
                height: *height,
            }),
            HostMessage::Close => Some(HostAction::Close),
            HostMessage::Unsupported => {
                debug!("ignoring unsupported bridge message");
                None
            }
        }
    }
}
