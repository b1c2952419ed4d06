use serde::{Deserialize, Serialize};

/// Capture-level metadata collected from header, meta and annotation
/// records during the reconstruction pass. Everything here is optional:
/// a stream with no header still reconstructs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureSummary {
    /// Capture file path from the header record
    pub source_path: Option<String>,

    /// Application name from the "ExeFileInfo" meta record
    pub app_name: Option<String>,

    /// Capture tool information from the "operation" annotation
    pub tool: Option<ToolInfo>,
}

/// Capture tool details carried by a kJson "operation" annotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Wall-clock time the capture was taken, reproduced verbatim
    pub timestamp: Option<String>,

    /// Version of the capture tool (gfxrecon-version)
    pub capture_version: Option<String>,

    /// Graphics API version the capture was taken against (vulkan-version)
    pub api_version: Option<String>,
}

impl CaptureSummary {
    pub fn is_empty(&self) -> bool {
        self.source_path.is_none() && self.app_name.is_none() && self.tool.is_none()
    }
}
