use framelens_types::ReportNode;
use owo_colors::OwoColorize;

/// Render the report tree as an indented plain-text listing, two spaces
/// per level. Interior labels are colored when writing to a terminal.
pub fn render(report: &ReportNode, color: bool) -> String {
    let mut out = String::new();
    report.walk(&mut |depth, node| {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(&line_for(node, color));
        out.push('\n');
    });
    out
}

fn line_for(node: &ReportNode, color: bool) -> String {
    match &node.value {
        Some(value) if node.label.is_empty() => format!("- {}", value),
        Some(value) => format!("{}: {}", node.label, value),
        None if node.label.is_empty() => "-".to_string(),
        None if color => node.label.cyan().to_string(),
        None => node.label.clone(),
    }
}
