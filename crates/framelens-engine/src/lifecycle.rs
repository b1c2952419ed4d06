use framelens_types::{Error, FunctionCall, Handle, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Command buffer recording lifecycle. Tracked but deliberately not
/// enforced as a state machine: captures in the wild contain recordings
/// outside Begin/End and double-Begins, and the reconstruction accepts
/// them as long as the handle is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Allocated,
    Recording,
    Ended,
}

/// One live command buffer: the call that allocated it and the command
/// log currently being recorded into it.
#[derive(Debug, Clone)]
pub struct CommandBufferResource {
    pub allocation: FunctionCall,
    pub commands: Vec<FunctionCall>,
    pub state: LifecycleState,
}

/// Registry of live command buffers keyed by handle.
///
/// A handle names at most one live resource: allocating under an
/// existing handle replaces the prior resource entirely. Resources are
/// never deleted, only superseded.
#[derive(Debug, Default)]
pub struct CommandBufferTable {
    buffers: HashMap<Handle, CommandBufferResource>,
}

impl CommandBufferTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every handle produced by a successful allocation call.
    /// The caller has already checked the return code.
    pub fn allocate(&mut self, call: &FunctionCall) -> Result<()> {
        for handle in allocation_handles(call)? {
            self.buffers.insert(
                handle,
                CommandBufferResource {
                    allocation: call.clone(),
                    commands: Vec::new(),
                    state: LifecycleState::Allocated,
                },
            );
        }
        Ok(())
    }

    /// Successful Begin: clear the recorded log and start over.
    pub fn begin(&mut self, handle: Handle, call: &FunctionCall) -> Result<()> {
        let resource = self.lookup(handle, call)?;
        resource.commands.clear();
        resource.state = LifecycleState::Recording;
        Ok(())
    }

    /// Append a recording command to the handle's live log, verbatim.
    pub fn record(&mut self, handle: Handle, call: FunctionCall) -> Result<()> {
        let resource = self.lookup(handle, &call)?;
        resource.commands.push(call);
        Ok(())
    }

    /// Successful End: the log is complete and retained until the next
    /// Begin.
    pub fn end(&mut self, handle: Handle, call: &FunctionCall) -> Result<()> {
        let resource = self.lookup(handle, call)?;
        resource.state = LifecycleState::Ended;
        Ok(())
    }

    /// Value copy of the handle's current command log, for submission
    /// snapshots. Later recording is never observable through the copy.
    pub fn snapshot(&self, handle: Handle) -> Option<Vec<FunctionCall>> {
        self.buffers.get(&handle).map(|r| r.commands.clone())
    }

    pub fn get(&self, handle: Handle) -> Option<&CommandBufferResource> {
        self.buffers.get(&handle)
    }

    fn lookup(&mut self, handle: Handle, call: &FunctionCall) -> Result<&mut CommandBufferResource> {
        self.buffers.get_mut(&handle).ok_or_else(|| Error::UnknownHandle {
            handle,
            call: call.name.clone(),
        })
    }
}

/// Handles produced by an allocation call (the pCommandBuffers array)
fn allocation_handles(call: &FunctionCall) -> Result<Vec<Handle>> {
    let Some(Value::Array(values)) = call.args.get("pCommandBuffers") else {
        return Err(Error::MalformedCall {
            call: call.name.clone(),
            detail: "pCommandBuffers is missing or not an array".to_string(),
        });
    };
    values
        .iter()
        .map(|value| {
            Handle::from_value(value).ok_or_else(|| Error::MalformedCall {
                call: call.name.clone(),
                detail: format!("pCommandBuffers entry is not a handle: {}", value),
            })
        })
        .collect()
}
