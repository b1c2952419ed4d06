use framelens_types::{CaptureEvent, Error, FunctionCall, MarkerType, Result};
use serde::de::Error as _;
use serde_json::Value;
use std::io::BufRead;

use crate::schema::RawRecord;

/// Decode one line of converter output into exactly one capture event.
///
/// Pure and stateless. There is no recovery for a malformed line:
/// reconstruction depends on total ordering, so a corrupt line
/// invalidates the rest of the stream and decoding fails fast.
pub fn decode_line(line_number: usize, line: &str) -> Result<CaptureEvent> {
    serde_json::from_str::<RawRecord>(line)
        .and_then(convert)
        .map_err(|source| Error::MalformedRecord {
            line_number,
            line: line.to_string(),
            source,
        })
}

/// Read an entire capture stream, one event per non-blank line.
/// Fails on the first malformed line; blank lines are tolerated since a
/// trailing newline is not a corrupt stream.
pub fn read_capture<R: BufRead>(reader: R) -> Result<Vec<CaptureEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(decode_line(idx + 1, &line)?);
    }
    Ok(events)
}

/// Map a raw record to its typed event. Payload keys are checked in the
/// converter's emission order; a record with none of them is malformed.
fn convert(raw: RawRecord) -> std::result::Result<CaptureEvent, serde_json::Error> {
    if let Some(header) = raw.header {
        return Ok(CaptureEvent::Header {
            source_path: header.source_path,
            metadata: Value::Object(header.rest),
        });
    }

    if let Some(meta) = raw.meta {
        return Ok(CaptureEvent::Meta {
            name: meta.name,
            args: meta.args,
        });
    }

    if let Some(annotation) = raw.annotation {
        // kJson annotation data arrives as a JSON-encoded string; decode
        // it here so downstream components never re-parse
        let payload = if annotation.kind == "kJson" {
            match annotation.data {
                Value::String(s) => serde_json::from_str(&s)?,
                other => {
                    return Err(serde_json::Error::custom(format!(
                        "kJson annotation data is not a JSON-encoded string: {}",
                        other
                    )));
                }
            }
        } else {
            annotation.data
        };
        return Ok(CaptureEvent::Annotation {
            kind: annotation.kind,
            label: annotation.label,
            payload,
        });
    }

    if let Some(frame) = raw.frame {
        let marker_type = match frame.marker_type.as_str() {
            "BeginMarker" => MarkerType::Begin,
            "EndMarker" => MarkerType::End,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "unknown frame marker type '{}'",
                    other
                )));
            }
        };
        let frame_number = frame_number_value(&frame.frame_number)?;
        return Ok(CaptureEvent::FrameMarker {
            marker_type,
            frame_number,
        });
    }

    if let Some(function) = raw.function {
        return Ok(CaptureEvent::Call(FunctionCall {
            name: function.name,
            args: function.args,
            return_code: function.return_code,
            sequence_index: raw.index,
        }));
    }

    Err(serde_json::Error::custom(
        "record carries no known payload key (header/meta/annotation/frame/function)",
    ))
}

fn frame_number_value(value: &Value) -> std::result::Result<u64, serde_json::Error> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        serde_json::Error::custom(format!("frame_number is not a non-negative integer: {}", value))
    })
}
