use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw shape of one converter output line. Each line carries exactly one
/// of the payload keys; `index` is the converter's stream position and
/// may accompany any of them.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(default)]
    pub index: Option<u64>,

    #[serde(default)]
    pub header: Option<RawHeader>,

    #[serde(default)]
    pub meta: Option<RawMeta>,

    #[serde(default)]
    pub annotation: Option<RawAnnotation>,

    #[serde(default)]
    pub frame: Option<RawFrame>,

    #[serde(default)]
    pub function: Option<RawFunction>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawHeader {
    #[serde(default, rename = "source-path")]
    pub source_path: Option<String>,

    /// Remaining header fields, reproduced in the report verbatim
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMeta {
    pub name: String,

    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAnnotation {
    #[serde(rename = "type")]
    pub kind: String,

    pub label: String,

    /// For kJson annotations this is a JSON-encoded string; other
    /// annotation kinds may carry arbitrary values
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFrame {
    pub marker_type: String,

    /// Emitted as an integer by current converters; older builds quote it
    pub frame_number: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFunction {
    pub name: String,

    #[serde(default)]
    pub args: Map<String, Value>,

    #[serde(default, rename = "return")]
    pub return_code: Option<String>,
}
