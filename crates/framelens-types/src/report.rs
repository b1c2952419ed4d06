use serde::{Deserialize, Serialize};

/// Generic tree element for the reconstructed report.
///
/// The whole hierarchy is one root node whose children are the summary
/// and frame nodes, recursively down to individual argument values.
/// Renderers consume the tree through [`ReportNode::walk`] or by direct
/// recursion; the tree itself carries no presentation concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportNode {
    pub label: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReportNode>,

    /// Terminal scalar content for leaf nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ReportNode {
    /// Interior node with no children yet
    pub fn branch(label: impl Into<String>) -> Self {
        ReportNode {
            label: label.into(),
            children: Vec::new(),
            value: None,
        }
    }

    /// Terminal node carrying scalar content
    pub fn leaf(label: impl Into<String>, value: impl Into<String>) -> Self {
        ReportNode {
            label: label.into(),
            children: Vec::new(),
            value: Some(value.into()),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<ReportNode>) -> Self {
        ReportNode {
            label: label.into(),
            children,
            value: None,
        }
    }

    pub fn push(&mut self, child: ReportNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first pre-order traversal. The visitor receives each node
    /// with its depth below the node `walk` was called on (self = 0).
    pub fn walk(&self, visit: &mut impl FnMut(usize, &ReportNode)) {
        self.walk_at(0, visit);
    }

    fn walk_at(&self, depth: usize, visit: &mut impl FnMut(usize, &ReportNode)) {
        visit(depth, self);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}
