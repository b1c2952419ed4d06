// Engine module - reconstructs the implicit frame/submission/command
// buffer hierarchy that the flat capture stream only encodes
// positionally. Sits between decoded capture events and presentation.

pub mod diagnostics;
pub mod frames;
pub mod lifecycle;
mod report;
mod resolver;

pub use diagnostics::Diagnostics;
pub use frames::{FrameClock, FrameEvent, FrameTable, SubmitGroup};
pub use lifecycle::{CommandBufferResource, CommandBufferTable, LifecycleState};
pub use report::build_report;

use framelens_types::{CaptureEvent, CaptureSummary, ReportNode, Result};

/// The finished output of a reconstruction pass. Immutable once built;
/// renderers may traverse it freely.
#[derive(Debug)]
pub struct Reconstruction {
    pub summary: CaptureSummary,
    pub frames: FrameTable,
    pub diagnostics: Diagnostics,
}

impl Reconstruction {
    /// Build the renderable report tree for this reconstruction
    pub fn report(&self) -> ReportNode {
        report::build_report(&self.summary, &self.frames)
    }
}

/// Run the reconstruction fold over an ordered stream of decoded events.
///
/// Strictly sequential: event order defines what "the current recorded
/// contents of a buffer" means at each submission, so records are
/// applied one at a time in stream order. The first fatal error aborts
/// the pass; there is no partial output.
pub fn reconstruct(events: impl IntoIterator<Item = CaptureEvent>) -> Result<Reconstruction> {
    let mut reconstructor = resolver::Reconstructor::new();
    for event in events {
        reconstructor.apply(event)?;
    }
    Ok(reconstructor.finish())
}
