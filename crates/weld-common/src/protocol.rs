//! Messages carried over the `weld` bridge from the page to the host.
//!
//! Every message is a JSON object discriminated by its `type` field:
//!
//! ```text
//! { "type": "inputMask", "masks": [[left, top, width, height], ...] }
//! { "type": "applyInputMask" }
//! { "type": "removeInputMask" }
//! { "type": "syncDimension", "height": 600, "width": 800 }
//! { "type": "close" }
//! ```
//!
//! The host-installed `window.weld` function stamps the widget `name` onto
//! each message before posting it, producing an [`Envelope`].

use serde::{Deserialize, Serialize};

use crate::errors::BridgeError;
use crate::types::{Dimensions, MaskRect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// Snapshot of every non-empty tracked mask.
    InputMask { masks: Vec<MaskRect> },
    /// Pointer left a masked element: restore passthrough.
    ApplyInputMask,
    /// Pointer entered a masked element: accept input everywhere.
    RemoveInputMask,
    /// Body box size changed.
    SyncDimension { height: u32, width: u32 },
    /// The page asks the host to tear the widget down.
    Close,
    /// Any message type this crate does not model.
    #[serde(other)]
    Unsupported,
}

impl HostMessage {
    pub fn input_mask(masks: impl IntoIterator<Item = MaskRect>) -> Self {
        Self::InputMask {
            masks: masks.into_iter().filter(|m| !m.is_empty()).collect(),
        }
    }

    pub fn sync_dimension(dimensions: Dimensions) -> Self {
        Self::SyncDimension {
            height: dimensions.height,
            width: dimensions.width,
        }
    }

    /// The wire name of this message's `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputMask { .. } => "inputMask",
            Self::ApplyInputMask => "applyInputMask",
            Self::RemoveInputMask => "removeInputMask",
            Self::SyncDimension { .. } => "syncDimension",
            Self::Close => "close",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A bridge message as received by the host, tagged with the sending widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub message: HostMessage,
}

impl Envelope {
    pub fn new(name: impl Into<String>, message: HostMessage) -> Self {
        Self {
            name: Some(name.into()),
            message,
        }
    }

    /// Parse an envelope from a raw IPC body.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Accept the envelope only if it is unaddressed or addressed to `widget`.
    pub fn addressed_to(self, widget: &str) -> Result<HostMessage, BridgeError> {
        match self.name {
            Some(name) if !name.is_empty() && name != widget => Err(BridgeError::WrongWidget {
                expected: widget.to_string(),
                got: name,
            }),
            _ => Ok(self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_mask_wire_shape() {
        let msg = HostMessage::input_mask([MaskRect::new(10.0, 20.0, 80.0, 40.0)]);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"type": "inputMask", "masks": [[10.0, 20.0, 80.0, 40.0]]})
        );
    }

    #[test]
    fn input_mask_drops_zero_area() {
        let msg = HostMessage::input_mask([
            MaskRect::new(0.0, 0.0, 0.0, 40.0),
            MaskRect::new(1.0, 1.0, 5.0, 5.0),
            MaskRect::new(0.0, 0.0, 40.0, 0.0),
        ]);
        assert_eq!(
            msg,
            HostMessage::InputMask {
                masks: vec![MaskRect::new(1.0, 1.0, 5.0, 5.0)]
            }
        );
    }

    #[test]
    fn unit_messages_carry_only_type() {
        assert_eq!(
            HostMessage::ApplyInputMask.to_json(),
            r#"{"type":"applyInputMask"}"#
        );
        assert_eq!(
            HostMessage::RemoveInputMask.to_json(),
            r#"{"type":"removeInputMask"}"#
        );
    }

    #[test]
    fn sync_dimension_wire_shape() {
        let msg = HostMessage::sync_dimension(Dimensions::new(800, 600));
        assert_eq!(
            msg.to_json(),
            r#"{"type":"syncDimension","height":600,"width":800}"#
        );
    }

    #[test]
    fn kind_matches_wire_tag() {
        let msgs = [
            HostMessage::input_mask([]),
            HostMessage::ApplyInputMask,
            HostMessage::RemoveInputMask,
            HostMessage::sync_dimension(Dimensions::default()),
            HostMessage::Close,
        ];
        for msg in msgs {
            let value = serde_json::to_value(&msg).unwrap();
            assert_eq!(value["type"], msg.kind());
        }
    }

    #[test]
    fn envelope_decodes_named_message() {
        let raw = r#"{"type":"syncDimension","height":30,"width":1920,"name":"bar"}"#;
        let env = Envelope::from_json(raw).unwrap();
        assert_eq!(env.name.as_deref(), Some("bar"));
        assert_eq!(
            env.message,
            HostMessage::SyncDimension {
                height: 30,
                width: 1920
            }
        );
    }

    #[test]
    fn envelope_decodes_float_masks() {
        let raw = r#"{"name":"bar","type":"inputMask","masks":[[10.5,20,80,40.25]]}"#;
        let env = Envelope::from_json(raw).unwrap();
        assert_eq!(
            env.message,
            HostMessage::InputMask {
                masks: vec![MaskRect::new(10.5, 20.0, 80.0, 40.25)]
            }
        );
    }

    #[test]
    fn envelope_unknown_type_is_unsupported() {
        let raw = r#"{"name":"bar","type":"exec","script":"notify-send hi"}"#;
        let env = Envelope::from_json(raw).unwrap();
        assert_eq!(env.message, HostMessage::Unsupported);
    }

    #[test]
    fn envelope_decodes_close() {
        let env = Envelope::from_json(r#"{"name":"bar","type":"close"}"#).unwrap();
        assert_eq!(env.message, HostMessage::Close);
    }

    #[test]
    fn envelope_rejects_garbage() {
        assert!(Envelope::from_json("not json").is_err());
        assert!(Envelope::from_json(r#"{"name":"bar"}"#).is_err());
        assert!(Envelope::from_json(r#"{"type":"inputMask","masks":"nope"}"#).is_err());
    }

    #[test]
    fn envelope_addressing() {
        let env = Envelope::new("bar", HostMessage::ApplyInputMask);
        assert_eq!(
            env.clone().addressed_to("bar").unwrap(),
            HostMessage::ApplyInputMask
        );
        assert!(matches!(
            env.addressed_to("dock"),
            Err(BridgeError::WrongWidget { .. })
        ));

        let anonymous = Envelope {
            name: None,
            message: HostMessage::RemoveInputMask,
        };
        assert!(anonymous.addressed_to("dock").is_ok());
    }

    #[test]
    fn envelope_serializes_flat() {
        let env = Envelope::new("bar", HostMessage::ApplyInputMask);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value, json!({"name": "bar", "type": "applyInputMask"}));
    }
}
