use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// NOTE: Schema Design Goals
//
// 1. Decode once: the line-oriented wire format is turned into these
//    typed records at the capture boundary and matched exhaustively
//    everywhere else. No component downstream of the decoder branches
//    on the presence of a JSON key.
//
// 2. Immutability: a decoded record is never mutated. The reconstruction
//    engine attaches derived data (frame attribution, snapshots) to its
//    own structures, not to the records.
//
// 3. Opaque arguments: call arguments are carried as ordered JSON values
//    and reproduced structurally in the report. No argument semantics
//    are interpreted beyond handle extraction.

/// Opaque process-unique identifier for a command buffer resource.
///
/// The converter emits handles as JSON integers; some builds quote them.
/// A handle names at most one live resource at a time - re-allocation
/// under the same value replaces the prior resource entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub u64);

impl Handle {
    /// Extract a handle from a JSON value in a handle position.
    /// Accepts an integer, a decimal string, or a 0x-prefixed hex string.
    pub fn from_value(value: &Value) -> Option<Handle> {
        match value {
            Value::Number(n) => n.as_u64().map(Handle),
            Value::String(s) => {
                let s = s.trim();
                if let Some(hex) = s.strip_prefix("0x") {
                    u64::from_str_radix(hex, 16).ok().map(Handle)
                } else {
                    s.parse::<u64>().ok().map(Handle)
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frame boundary marker type. The frame counter advances on End only;
/// the boundary is defined by the close of a frame window, mirroring how
/// the capture tool timestamps frame completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerType {
    Begin,
    End,
}

/// One decoded API call from the capture stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// API function name, e.g. "vkCmdDraw"
    pub name: String,

    /// Ordered argument mapping, opaque except for handle extraction
    #[serde(default)]
    pub args: Map<String, Value>,

    /// Return code as reported by the capture ("VK_SUCCESS", ...);
    /// None for calls that return nothing
    #[serde(default)]
    pub return_code: Option<String>,

    /// Position of this call in the capture stream, when the converter
    /// emitted one. Used only in diagnostics.
    #[serde(default)]
    pub sequence_index: Option<u64>,
}

impl FunctionCall {
    /// True when the capture reports this call as having succeeded
    pub fn succeeded(&self) -> bool {
        self.return_code.as_deref() == Some("VK_SUCCESS")
    }

    /// The command buffer handle argument carried by per-buffer calls
    pub fn command_buffer_handle(&self) -> Option<Handle> {
        self.args.get("commandBuffer").and_then(Handle::from_value)
    }
}

/// One decoded record from the capture stream. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CaptureEvent {
    /// Stream header - exactly one per capture, informational
    Header {
        source_path: Option<String>,
        metadata: Value,
    },

    /// Capture tool metadata record; "ExeFileInfo" carries the
    /// application name used in the report summary
    Meta { name: String, args: Value },

    /// Capture tool annotation; a "kJson"/"operation" annotation may
    /// carry capture timestamp and version information in its payload.
    /// kJson payloads arrive JSON-encoded and are decoded at the
    /// boundary; other kinds are carried as-is.
    Annotation {
        kind: String,
        label: String,
        payload: Value,
    },

    /// Frame boundary marker
    FrameMarker {
        marker_type: MarkerType,
        frame_number: u64,
    },

    /// API function call
    Call(FunctionCall),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handle_from_integer() {
        assert_eq!(Handle::from_value(&json!(7)), Some(Handle(7)));
    }

    #[test]
    fn handle_from_decimal_string() {
        assert_eq!(Handle::from_value(&json!("42")), Some(Handle(42)));
    }

    #[test]
    fn handle_from_hex_string() {
        assert_eq!(Handle::from_value(&json!("0x2a")), Some(Handle(42)));
    }

    #[test]
    fn handle_rejects_non_numeric() {
        assert_eq!(Handle::from_value(&json!("swapchain")), None);
        assert_eq!(Handle::from_value(&json!([7])), None);
        assert_eq!(Handle::from_value(&json!(null)), None);
    }

    #[test]
    fn call_success_requires_vk_success() {
        let mut call = FunctionCall {
            name: "vkEndCommandBuffer".to_string(),
            args: Map::new(),
            return_code: Some("VK_SUCCESS".to_string()),
            sequence_index: None,
        };
        assert!(call.succeeded());

        call.return_code = Some("VK_ERROR_DEVICE_LOST".to_string());
        assert!(!call.succeeded());

        call.return_code = None;
        assert!(!call.succeeded());
    }

    #[test]
    fn command_buffer_handle_extraction() {
        let call = FunctionCall {
            name: "vkCmdDraw".to_string(),
            args: serde_json::from_value(json!({"commandBuffer": 9, "vertexCount": 3}))
                .expect("valid args object"),
            return_code: None,
            sequence_index: Some(120),
        };
        assert_eq!(call.command_buffer_handle(), Some(Handle(9)));
    }
}
