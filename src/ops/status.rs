use crate::model::node::NodeStatus;

/// Derive a node's status from its content.
///
/// `pinned` carries the node's manual status: `Some(Complete)` is sticky and
/// wins regardless of content. Anything else falls through to the content
/// rule: blank title and blank summary → `Empty`, otherwise `InProgress`.
pub fn get_auto_status(title: &str, summary: &str, pinned: Option<NodeStatus>) -> NodeStatus {
    if pinned == Some(NodeStatus::Complete) {
        return NodeStatus::Complete;
    }
    if title.trim().is_empty() && summary.trim().is_empty() {
        NodeStatus::Empty
    } else {
        NodeStatus::InProgress
    }
}

/// Manual toggle: empty → in-progress → complete → empty
pub fn cycle_status(current: NodeStatus) -> NodeStatus {
    match current {
        NodeStatus::Empty => NodeStatus::InProgress,
        NodeStatus::InProgress => NodeStatus::Complete,
        NodeStatus::Complete => NodeStatus::Empty,
    }
}
