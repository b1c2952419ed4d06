use assert_cmd::Command;
use predicates::prelude::*;

const CAPTURE: &str = r#"{"header": {"source-path": "/captures/triangle.gfxr"}}
{"meta": {"name": "ExeFileInfo", "args": {"app_name": "triangle"}}}
{"function": {"name": "vkAllocateCommandBuffers", "args": {"pCommandBuffers": [7]}, "return": "VK_SUCCESS"}}
{"function": {"name": "vkBeginCommandBuffer", "args": {"commandBuffer": 7}, "return": "VK_SUCCESS"}}
{"function": {"name": "vkCmdDraw", "args": {"commandBuffer": 7, "vertexCount": 3}}}
{"function": {"name": "vkEndCommandBuffer", "args": {"commandBuffer": 7}, "return": "VK_SUCCESS"}}
{"function": {"name": "vkQueueSubmit", "args": {"pSubmits": [{"pCommandBuffers": [7]}]}, "return": "VK_SUCCESS"}}
{"function": {"name": "vkQueuePresentKHR", "args": {"pImageIndices": [0]}}}
{"frame": {"marker_type": "EndMarker", "frame_number": 0}}
"#;

fn framelens() -> Command {
    Command::cargo_bin("framelens").expect("binary builds")
}

#[test]
fn renders_html_report_from_stdin() {
    framelens()
        .write_stdin(CAPTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<title>Capture analysis for triangle.gfxr</title>",
        ))
        .stdout(predicate::str::contains("frame 1 (2 enqueues)"))
        .stdout(predicate::str::contains(
            "vkQueueSubmit (1 submission, command buffer 7)",
        ))
        .stdout(predicate::str::contains("class=\"collapsible\""))
        .stdout(predicate::str::contains("expand-button"));
}

#[test]
fn renders_json_report() {
    let output = framelens()
        .args(["--format", "json"])
        .write_stdin(CAPTURE)
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["label"], "Capture analysis for triangle.gfxr");
    assert_eq!(report["children"][0]["label"], "Summary");
    assert_eq!(report["children"][1]["label"], "frame 1 (2 enqueues)");
}

#[test]
fn writes_text_report_to_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out_path = dir.path().join("report.txt");
    let in_path = dir.path().join("capture.jsonl");
    std::fs::write(&in_path, CAPTURE).expect("fixture written");

    framelens()
        .arg(&in_path)
        .args(["--format", "text", "--output"])
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let report = std::fs::read_to_string(&out_path).expect("report written");
    assert!(report.contains("frame 1 (2 enqueues)"));
    assert!(report.contains("vertexCount: 3"));
}

#[test]
fn malformed_line_aborts_with_context() {
    framelens()
        .write_stdin("{\"header\": {}}\nnot a record\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("not a record"));
}

#[test]
fn unknown_handle_aborts() {
    framelens()
        .write_stdin(
            r#"{"function": {"name": "vkBeginCommandBuffer", "args": {"commandBuffer": 99}, "return": "VK_SUCCESS"}}"#,
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"))
        .stderr(predicate::str::contains("never allocated"));
}

#[test]
fn unhandled_calls_are_summarized_on_stderr() {
    let capture = format!(
        "{CAPTURE}{}\n",
        r#"{"function": {"name": "vkWaitForFences", "args": {}, "return": "VK_SUCCESS"}}"#
    );

    framelens()
        .write_stdin(capture.clone())
        .assert()
        .success()
        .stderr(predicate::str::contains("vkWaitForFences"));

    framelens()
        .arg("--quiet")
        .write_stdin(capture)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
