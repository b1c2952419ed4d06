use framelens_types::{
    CaptureEvent, CaptureSummary, Error, FunctionCall, Handle, Result, ToolInfo,
};
use serde_json::Value;

use crate::Reconstruction;
use crate::diagnostics::Diagnostics;
use crate::frames::{FrameClock, FrameEvent, FrameTable, SubmitGroup};
use crate::lifecycle::CommandBufferTable;

/// The reconstruction fold.
///
/// All mutable state of the pass lives here and is threaded explicitly
/// through `apply` - there are no ambient registries. Event order is
/// semantically load-bearing ("current recorded contents of a buffer at
/// the time of submission"), so records must be applied strictly in
/// stream order.
pub(crate) struct Reconstructor {
    summary: CaptureSummary,
    buffers: CommandBufferTable,
    clock: FrameClock,
    frames: FrameTable,
    diagnostics: Diagnostics,
}

impl Reconstructor {
    pub(crate) fn new() -> Self {
        Reconstructor {
            summary: CaptureSummary::default(),
            buffers: CommandBufferTable::new(),
            clock: FrameClock::new(),
            frames: FrameTable::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub(crate) fn apply(&mut self, event: CaptureEvent) -> Result<()> {
        match event {
            CaptureEvent::Header { source_path, .. } => {
                self.summary.source_path = source_path;
                Ok(())
            }
            CaptureEvent::Meta { name, args } => {
                if name == "ExeFileInfo" {
                    self.summary.app_name = args
                        .get("app_name")
                        .and_then(Value::as_str)
                        .map(str::to_string);
                }
                Ok(())
            }
            CaptureEvent::Annotation {
                kind,
                label,
                payload,
            } => {
                // A capture operation annotation is recognized by its
                // "tool" marker key
                if kind == "kJson" && label == "operation" && payload.get("tool").is_some() {
                    self.summary.tool = Some(ToolInfo {
                        timestamp: string_field(&payload, "timestamp"),
                        capture_version: string_field(&payload, "gfxrecon-version"),
                        api_version: string_field(&payload, "vulkan-version"),
                    });
                }
                Ok(())
            }
            CaptureEvent::FrameMarker {
                marker_type,
                frame_number,
            } => {
                self.clock.observe(marker_type, frame_number);
                Ok(())
            }
            CaptureEvent::Call(call) => self.apply_call(call),
        }
    }

    /// Classify and apply one API call. Names outside the handled set go
    /// to diagnostics; handled names that report failure are dropped
    /// entirely (a failed Begin is recorded nowhere).
    fn apply_call(&mut self, call: FunctionCall) -> Result<()> {
        match call.name.as_str() {
            "vkAllocateCommandBuffers" => {
                if call.succeeded() {
                    self.buffers.allocate(&call)?;
                }
                Ok(())
            }
            "vkBeginCommandBuffer" => {
                if call.succeeded() {
                    let handle = recording_handle(&call)?;
                    self.buffers.begin(handle, &call)?;
                }
                Ok(())
            }
            "vkEndCommandBuffer" => {
                if call.succeeded() {
                    let handle = recording_handle(&call)?;
                    self.buffers.end(handle, &call)?;
                }
                Ok(())
            }
            "vkQueueSubmit" => {
                if call.succeeded() {
                    self.resolve_submission(call)?;
                }
                Ok(())
            }
            // Present carries no command buffer content and is attributed
            // to the frame regardless of its return code
            "vkQueuePresentKHR" => {
                self.frames
                    .push(self.clock.current(), FrameEvent::Present { call });
                Ok(())
            }
            name if name.starts_with("vkCmd") => {
                let handle = recording_handle(&call)?;
                self.buffers.record(handle, call)
            }
            _ => {
                self.diagnostics.record_unhandled(&call.name);
                Ok(())
            }
        }
    }

    /// Bind a value-copy snapshot of every named command buffer's current
    /// recorded commands into the submission, then attribute it to the
    /// current frame. Snapshots are clones: re-recording a buffer later
    /// is never observable through a submission already resolved.
    fn resolve_submission(&mut self, call: FunctionCall) -> Result<()> {
        let Some(Value::Array(raw_groups)) = call.args.get("pSubmits") else {
            return Err(Error::MalformedCall {
                call: call.name.clone(),
                detail: "pSubmits is missing or not an array".to_string(),
            });
        };

        let mut groups = Vec::with_capacity(raw_groups.len());
        for raw_group in raw_groups {
            let Some(Value::Array(raw_handles)) = raw_group.get("pCommandBuffers") else {
                return Err(Error::MalformedCall {
                    call: call.name.clone(),
                    detail: format!("submit group has no pCommandBuffers array: {}", raw_group),
                });
            };

            let mut buffers = Vec::with_capacity(raw_handles.len());
            for raw_handle in raw_handles {
                let handle = Handle::from_value(raw_handle).ok_or_else(|| Error::MalformedCall {
                    call: call.name.clone(),
                    detail: format!("pCommandBuffers entry is not a handle: {}", raw_handle),
                })?;
                let snapshot =
                    self.buffers
                        .snapshot(handle)
                        .ok_or_else(|| Error::UnresolvedSubmission {
                            handle,
                            group: raw_group.to_string(),
                        })?;
                buffers.push((handle, snapshot));
            }
            groups.push(SubmitGroup { buffers });
        }

        self.frames
            .push(self.clock.current(), FrameEvent::Submission { call, groups });
        Ok(())
    }

    pub(crate) fn finish(self) -> Reconstruction {
        Reconstruction {
            summary: self.summary,
            frames: self.frames,
            diagnostics: self.diagnostics,
        }
    }
}

/// The commandBuffer handle argument required by begin/record/end calls
fn recording_handle(call: &FunctionCall) -> Result<Handle> {
    call.command_buffer_handle().ok_or_else(|| Error::MalformedCall {
        call: call.name.clone(),
        detail: "commandBuffer is missing or not a handle".to_string(),
    })
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}
