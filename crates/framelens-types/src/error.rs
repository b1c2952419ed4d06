use std::fmt;

use crate::record::Handle;

/// Result type for framelens operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding or reconstructing a capture
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// A line of the capture stream is not a well-formed record.
    /// Fatal: record order is load-bearing, so a corrupt line invalidates
    /// everything after it.
    MalformedRecord {
        line_number: usize,
        line: String,
        source: serde_json::Error,
    },

    /// An allocation or submit call carries arguments that do not match
    /// the expected handle layout
    MalformedCall { call: String, detail: String },

    /// A begin/record/end call references a handle with no live resource
    UnknownHandle { handle: Handle, call: String },

    /// A submission references a handle with no live resource
    UnresolvedSubmission { handle: Handle, group: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::MalformedRecord {
                line_number,
                line,
                source,
            } => write!(
                f,
                "malformed record on line {}: {} (line: '{}')",
                line_number, source, line
            ),
            Error::MalformedCall { call, detail } => {
                write!(f, "malformed arguments in {}: {}", call, detail)
            }
            Error::UnknownHandle { handle, call } => write!(
                f,
                "{} references command buffer {} which was never allocated",
                call, handle
            ),
            Error::UnresolvedSubmission { handle, group } => write!(
                f,
                "submission references command buffer {} which was never allocated (group: {})",
                handle, group
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::MalformedRecord { source, .. } => Some(source),
            Error::MalformedCall { .. }
            | Error::UnknownHandle { .. }
            | Error::UnresolvedSubmission { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
