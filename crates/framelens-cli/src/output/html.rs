use framelens_types::ReportNode;

/// Render the report tree as a standalone HTML page.
///
/// Every interior node becomes a collapsible button with its subtree in
/// the following content block; the page header carries expand-all and
/// collapse-all controls. Everything starts collapsed.
pub fn render(report: &ReportNode) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str(&format!("<title>{}</title>\n", escape(&report.label)));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h2>{}</h2>\n", escape(&report.label)));
    out.push_str("<button type=\"button\" class=\"expand-button\">Expand all</button>\n");
    out.push_str("<button type=\"button\" class=\"collapse-button\">Collapse all</button>\n");
    out.push_str("<hr>\n");
    for child in &report.children {
        render_node(child, &mut out);
    }
    out.push_str(SCRIPT);
    out.push_str("</body>\n</html>\n");
    out
}

fn render_node(node: &ReportNode, out: &mut String) {
    if node.children.is_empty() {
        render_leaf(node, out);
        return;
    }

    out.push_str(&format!(
        "<button type=\"button\" class=\"collapsible\">{}</button>\n",
        escape(&node.label)
    ));
    out.push_str("<div class=\"content\">\n");
    for child in &node.children {
        render_node(child, out);
    }
    out.push_str("</div>\n");
}

fn render_leaf(node: &ReportNode, out: &mut String) {
    out.push_str("<div class=\"row\">");
    if !node.label.is_empty() {
        out.push_str(&format!("<span class=\"jsonkey\">{}</span>", escape(&node.label)));
    }
    if let Some(value) = &node.value {
        if !node.label.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("<span class=\"jsonval\">{}</span>", escape(value)));
    }
    out.push_str("</div>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = r#"<style>
    .jsonkey {
        vertical-align: top;
        font-weight: bold;
    }

    .jsonval {
        vertical-align: top;
    }

    .row {
        padding-left: 18px;
    }

    .collapsible {
        background-color: #FFF;
        padding: 2px;
        border: none;
        text-align: left;
        outline: none;
        font-size: 15px;
        display: block;
    }

    .content {
        padding: 0 18px;
        display: none;
        overflow: hidden;
    }

    .collapsible:before {
        content: '+';
        width: 1em;
        float: left;
        margin-left: 5px;
    }

    .active:before {
        content: '-';
    }
</style>
"#;

const SCRIPT: &str = r#"<script>
    var coll = document.getElementsByClassName("collapsible");
    var i;

    for (i = 0; i < coll.length; i++) {
        coll[i].nextElementSibling.style.display = "none";
        coll[i].addEventListener("click", function() {
            this.classList.toggle("active");
            var content = this.nextElementSibling;
            if (content.style.display === "block") {
                content.style.display = "none";
            } else {
                content.style.display = "block";
            }
        });
    }

    var expand_button = document.getElementsByClassName("expand-button")[0];
    var collapse_button = document.getElementsByClassName("collapse-button")[0];
    expand_button.addEventListener("click", function() {
        for (var i = 0; i < coll.length; i++) {
            coll[i].classList.add("active");
            coll[i].nextElementSibling.style.display = "block";
        }
    });
    collapse_button.addEventListener("click", function() {
        for (var i = 0; i < coll.length; i++) {
            coll[i].classList.remove("active");
            coll[i].nextElementSibling.style.display = "none";
        }
    });
</script>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_nodes_become_collapsible_buttons() {
        let mut root = ReportNode::branch("Capture analysis for cap.gfxr");
        let mut frame = ReportNode::branch("frame 1 (1 enqueues)");
        frame.push(ReportNode::leaf("vertexCount", "3"));
        root.push(frame);

        let html = render(&root);
        assert!(html.contains("<title>Capture analysis for cap.gfxr</title>"));
        assert!(
            html.contains("<button type=\"button\" class=\"collapsible\">frame 1 (1 enqueues)</button>")
        );
        assert!(html.contains("<span class=\"jsonkey\">vertexCount</span>"));
        assert!(html.contains("expand-button"));
        assert!(html.contains("collapse-button"));
    }

    #[test]
    fn labels_are_escaped() {
        let root = ReportNode::with_children(
            "a <b> & \"c\"",
            vec![ReportNode::leaf("k", "<v>")],
        );
        let html = render(&root);
        assert!(html.contains("a &lt;b&gt; &amp; &quot;c&quot;"));
        assert!(html.contains("&lt;v&gt;"));
        assert!(!html.contains("<v>"));
    }
}
