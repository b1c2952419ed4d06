use framelens_types::{CaptureSummary, FunctionCall, ReportNode};
use serde_json::{Map, Value};
use std::path::Path;

use crate::frames::{FrameEvent, FrameTable, SubmitGroup};

/// Fold the finished frame table into the report tree: a summary node
/// followed by one node per frame in ascending order.
///
/// Pure transform - owns nothing mutable, reads the table as-is.
pub fn build_report(summary: &CaptureSummary, frames: &FrameTable) -> ReportNode {
    let mut root = ReportNode::branch(root_label(summary));
    root.push(summary_node(summary));
    for (number, events) in frames.iter() {
        root.push(frame_node(number, events));
    }
    root
}

fn root_label(summary: &CaptureSummary) -> String {
    summary
        .source_path
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map(|name| format!("Capture analysis for {}", name.to_string_lossy()))
        .unwrap_or_else(|| "Capture analysis".to_string())
}

fn summary_node(summary: &CaptureSummary) -> ReportNode {
    let mut node = ReportNode::branch("Summary");
    if let Some(path) = &summary.source_path {
        node.push(ReportNode::leaf("File", path));
    }
    if let Some(app) = &summary.app_name {
        node.push(ReportNode::leaf("Executable filename", app));
    }
    if let Some(tool) = &summary.tool {
        if let Some(timestamp) = &tool.timestamp {
            node.push(ReportNode::leaf("Captured", timestamp));
        }
        if let Some(version) = &tool.capture_version {
            node.push(ReportNode::leaf("Capture tool version", version));
        }
        if let Some(version) = &tool.api_version {
            node.push(ReportNode::leaf("API version", version));
        }
    }
    node
}

fn frame_node(number: u64, events: &[FrameEvent]) -> ReportNode {
    ReportNode::with_children(
        format!("frame {} ({} enqueues)", number, events.len()),
        events.iter().map(event_node).collect(),
    )
}

fn event_node(event: &FrameEvent) -> ReportNode {
    match event {
        FrameEvent::Present { call } => command_node(call),
        FrameEvent::Submission { call, groups } => submission_node(call, groups),
    }
}

/// A submission with exactly one group naming exactly one buffer
/// collapses directly to that buffer's commands; the intermediate
/// group/buffer layer is elided for readability, nothing else changes.
/// Group count alone selects the path.
fn submission_node(call: &FunctionCall, groups: &[SubmitGroup]) -> ReportNode {
    if let [group] = groups {
        if let [(handle, commands)] = group.buffers.as_slice() {
            return ReportNode::with_children(
                format!("{} (1 submission, command buffer {})", call.name, handle),
                commands.iter().map(command_node).collect(),
            );
        }
    }

    ReportNode::with_children(
        format!("{} ({} submissions)", call.name, groups.len()),
        groups
            .iter()
            .enumerate()
            .map(|(idx, group)| group_node(idx, group))
            .collect(),
    )
}

fn group_node(idx: usize, group: &SubmitGroup) -> ReportNode {
    ReportNode::with_children(
        format!("submission {}", idx + 1),
        group
            .buffers
            .iter()
            .map(|(handle, commands)| {
                ReportNode::with_children(
                    format!("Command buffer {}", handle),
                    commands.iter().map(command_node).collect(),
                )
            })
            .collect(),
    )
}

fn command_node(call: &FunctionCall) -> ReportNode {
    ReportNode::with_children(call.name.clone(), args_children(&call.args))
}

// Generic structural walk over an argument mapping: object entries
// become labeled children, array entries unlabeled children, scalars
// leaf values. Argument semantics stay opaque.

fn args_children(args: &Map<String, Value>) -> Vec<ReportNode> {
    args.iter()
        .map(|(key, value)| entry_node(key, value))
        .collect()
}

fn entry_node(label: &str, value: &Value) -> ReportNode {
    match value {
        Value::Object(map) => ReportNode::with_children(label, args_children(map)),
        Value::Array(items) => {
            ReportNode::with_children(label, items.iter().map(|v| entry_node("", v)).collect())
        }
        scalar => ReportNode::leaf(label, scalar_text(scalar)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framelens_types::Handle;
    use serde_json::json;

    fn call(name: &str, args: serde_json::Value) -> FunctionCall {
        FunctionCall {
            name: name.to_string(),
            args: serde_json::from_value(args).expect("args object"),
            return_code: Some("VK_SUCCESS".to_string()),
            sequence_index: None,
        }
    }

    fn draw() -> FunctionCall {
        call("vkCmdDraw", json!({"commandBuffer": 7, "vertexCount": 3}))
    }

    #[test]
    fn single_group_single_buffer_collapses() {
        let submit = call("vkQueueSubmit", json!({"pSubmits": [{"pCommandBuffers": [7]}]}));
        let groups = vec![SubmitGroup {
            buffers: vec![(Handle(7), vec![draw()])],
        }];

        let node = submission_node(&submit, &groups);
        assert_eq!(node.label, "vkQueueSubmit (1 submission, command buffer 7)");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].label, "vkCmdDraw");
    }

    #[test]
    fn single_group_two_buffers_keeps_buffer_layer() {
        let submit = call("vkQueueSubmit", json!({"pSubmits": [{"pCommandBuffers": [7, 8]}]}));
        let groups = vec![SubmitGroup {
            buffers: vec![(Handle(7), vec![draw()]), (Handle(8), vec![])],
        }];

        let node = submission_node(&submit, &groups);
        assert_eq!(node.label, "vkQueueSubmit (1 submissions)");
        assert_eq!(node.children.len(), 1);
        let group = &node.children[0];
        assert_eq!(group.label, "submission 1");
        assert_eq!(group.children[0].label, "Command buffer 7");
        assert_eq!(group.children[1].label, "Command buffer 8");
    }

    #[test]
    fn two_groups_with_one_buffer_each_do_not_collapse() {
        let submit = call(
            "vkQueueSubmit",
            json!({"pSubmits": [{"pCommandBuffers": [7]}, {"pCommandBuffers": [7]}]}),
        );
        let groups = vec![
            SubmitGroup {
                buffers: vec![(Handle(7), vec![draw()])],
            },
            SubmitGroup {
                buffers: vec![(Handle(7), vec![draw()])],
            },
        ];

        let node = submission_node(&submit, &groups);
        assert_eq!(node.label, "vkQueueSubmit (2 submissions)");
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].label, "submission 1");
        assert_eq!(node.children[1].label, "submission 2");
    }

    #[test]
    fn args_walk_handles_nested_structure() {
        let children = args_children(
            &call(
                "vkCmdBeginRenderPass",
                json!({
                    "renderPass": 12,
                    "clearValues": [{"color": [0.0, 0.5]}],
                    "label": "main pass"
                }),
            )
            .args,
        );

        assert_eq!(children.len(), 3);

        assert_eq!(children[0].label, "renderPass");
        assert_eq!(children[0].value.as_deref(), Some("12"));

        let clear_values = &children[1];
        assert_eq!(clear_values.label, "clearValues");
        let element = &clear_values.children[0];
        assert_eq!(element.label, "");
        assert_eq!(element.children[0].label, "color");
        assert_eq!(element.children[0].children[0].value.as_deref(), Some("0.0"));

        // Strings render without quotes
        assert_eq!(children[2].value.as_deref(), Some("main pass"));
    }

    #[test]
    fn summary_rows_only_for_known_fields() {
        let summary = CaptureSummary {
            source_path: Some("/captures/triangle.gfxr".to_string()),
            app_name: None,
            tool: None,
        };
        let node = summary_node(&summary);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].label, "File");

        let root = build_report(&summary, &FrameTable::new());
        assert_eq!(root.label, "Capture analysis for triangle.gfxr");
    }
}
