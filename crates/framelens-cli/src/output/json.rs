use framelens_types::ReportNode;

/// Serialize the report tree as pretty-printed JSON, one trailing
/// newline, no presentation concerns baked in.
pub fn render(report: &ReportNode) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}
