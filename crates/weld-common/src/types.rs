use serde::{Deserialize, Serialize};
use std::fmt;

/// An element's bounding box in viewport-relative page pixels.
///
/// On the wire a rect is the 4-element array `[left, top, width, height]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct MaskRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl MaskRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect with zero width or zero height covers nothing and is never
    /// sent to the host.
    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

impl From<[f64; 4]> for MaskRect {
    fn from([left, top, width, height]: [f64; 4]) -> Self {
        Self::new(left, top, width, height)
    }
}

impl From<MaskRect> for [f64; 4] {
    fn from(r: MaskRect) -> Self {
        [r.left, r.top, r.width, r.height]
    }
}

impl fmt::Display for MaskRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Size of the document body box, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: u32,
    pub width: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { height, width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_serializes_as_array() {
        let r = MaskRect::new(10.0, 20.0, 80.0, 40.0);
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json, serde_json::json!([10.0, 20.0, 80.0, 40.0]));
    }

    #[test]
    fn rect_deserializes_from_integer_array() {
        let r: MaskRect = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(r, MaskRect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn zero_width_or_height_is_empty() {
        assert!(MaskRect::new(5.0, 5.0, 0.0, 10.0).is_empty());
        assert!(MaskRect::new(5.0, 5.0, 10.0, 0.0).is_empty());
        assert!(MaskRect::default().is_empty());
        assert!(!MaskRect::new(0.0, 0.0, 0.5, 0.5).is_empty());
    }

    #[test]
    fn rect_equality_is_exact() {
        let a = MaskRect::new(10.0, 20.0, 80.0, 40.0);
        let b = MaskRect::new(10.0, 20.0, 80.0, 40.000_001);
        assert_ne!(a, b);
    }

    #[test]
    fn rect_display() {
        let r = MaskRect::new(10.0, 20.0, 80.0, 40.0);
        assert_eq!(r.to_string(), "80x40+10+20");
    }

    #[test]
    fn dimensions_field_order() {
        let d = Dimensions::new(800, 600);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"height":600,"width":800}"#);
    }
}
