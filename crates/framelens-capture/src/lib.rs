// Capture boundary - decodes the converter's line-oriented JSON output
// into typed CaptureEvent records, exactly once, fail-fast.

mod reader;
mod schema;

pub use reader::{decode_line, read_capture};
