use framelens_types::{FunctionCall, Handle, MarkerType};
use std::collections::BTreeMap;

/// Current frame counter. Starts at 1; everything observed before the
/// first End marker belongs to frame 1. The boundary is the close of a
/// frame window: an End marker carrying frame number n moves the clock
/// to n + 1, Begin markers are observed but change nothing.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    current: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { current: 1 }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn observe(&mut self, marker_type: MarkerType, frame_number: u64) {
        if marker_type == MarkerType::End {
            self.current = frame_number + 1;
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// One snapshot group of a submission: the command buffers it named, in
/// submission order, each paired with a value copy of its recorded
/// commands taken at the moment of submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitGroup {
    pub buffers: Vec<(Handle, Vec<FunctionCall>)>,
}

/// A resolved top-level event attributed to a frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// A successful queue submission with its command buffer snapshots
    Submission {
        call: FunctionCall,
        groups: Vec<SubmitGroup>,
    },

    /// A presentation; carries no command buffer content
    Present { call: FunctionCall },
}

impl FrameEvent {
    pub fn call(&self) -> &FunctionCall {
        match self {
            FrameEvent::Submission { call, .. } => call,
            FrameEvent::Present { call } => call,
        }
    }
}

/// Resolved events grouped by frame number.
///
/// Backed by a BTreeMap so ascending frame iteration is a contract of
/// the container, not an incidental property.
#[derive(Debug, Default)]
pub struct FrameTable {
    frames: BTreeMap<u64, Vec<FrameEvent>>,
}

impl FrameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame_number: u64, event: FrameEvent) {
        self.frames.entry(frame_number).or_default().push(event);
    }

    /// Frames in ascending frame-number order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[FrameEvent])> {
        self.frames.iter().map(|(n, events)| (*n, events.as_slice()))
    }

    pub fn get(&self, frame_number: u64) -> Option<&[FrameEvent]> {
        self.frames.get(&frame_number).map(|v| v.as_slice())
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_one_and_advances_on_end_only() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.current(), 1);

        clock.observe(MarkerType::Begin, 0);
        assert_eq!(clock.current(), 1);

        clock.observe(MarkerType::End, 0);
        assert_eq!(clock.current(), 1);

        clock.observe(MarkerType::End, 1);
        assert_eq!(clock.current(), 2);
    }

    #[test]
    fn table_iterates_frames_in_ascending_order() {
        let mut table = FrameTable::new();
        let present = FrameEvent::Present {
            call: FunctionCall {
                name: "vkQueuePresentKHR".to_string(),
                args: serde_json::Map::new(),
                return_code: Some("VK_SUCCESS".to_string()),
                sequence_index: None,
            },
        };
        table.push(3, present.clone());
        table.push(1, present.clone());
        table.push(2, present);

        let order: Vec<u64> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }
}
