pub mod error;
pub mod record;
pub mod report;
pub mod summary;

pub use error::{Error, Result};
pub use record::*;
pub use report::ReportNode;
pub use summary::{CaptureSummary, ToolInfo};
