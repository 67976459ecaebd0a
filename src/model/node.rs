use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the single root node of every fractal tree.
pub const ROOT_ID: &str = "root";

/// Ordered child ids from (but excluding) the root down to a target node.
/// An empty path addresses the root itself.
pub type NodePath = Vec<String>;

/// Completion state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStatus {
    Empty,
    InProgress,
    Complete,
}

impl NodeStatus {
    /// The character shown inside the `[ ]` marker in tree listings
    pub fn checkbox_char(self) -> char {
        match self {
            NodeStatus::Empty => ' ',
            NodeStatus::InProgress => '>',
            NodeStatus::Complete => 'x',
        }
    }

    /// Wire name, as used in JSON and on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Empty => "empty",
            NodeStatus::InProgress => "in-progress",
            NodeStatus::Complete => "complete",
        }
    }

    /// Parse a user-supplied status name. Accepts the wire names plus a few
    /// common spellings.
    pub fn parse(s: &str) -> Option<NodeStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "todo" => Some(NodeStatus::Empty),
            "in-progress" | "in_progress" | "inprogress" | "active" => {
                Some(NodeStatus::InProgress)
            }
            "complete" | "completed" | "done" => Some(NodeStatus::Complete),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation and last-modification timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMetadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl NodeMetadata {
    pub fn now() -> Self {
        let now = Utc::now();
        NodeMetadata {
            created: now,
            modified: now,
        }
    }
}

/// One element of the fractal tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Opaque id, stable for the node's lifetime
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub status: NodeStatus,
    /// User-defined label for this node's tier (e.g. "Chapter", "Task")
    pub level_name: String,
    /// Children in display order
    #[serde(default)]
    pub children: Vec<Node>,
    pub metadata: NodeMetadata,
}

impl Node {
    /// Title for display, falling back to `Untitled <level>` when blank
    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!("Untitled {}", self.level_name)
        } else {
            self.title.clone()
        }
    }

    pub fn child(&self, id: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn child_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.metadata.modified = now;
    }
}

/// Create a node with empty title/summary, `Empty` status and no children.
/// A fresh UUID is generated when `id` is omitted.
pub fn create_empty_node(level_name: &str, id: Option<&str>) -> Node {
    let id = match id {
        Some(id) => id.to_string(),
        None => uuid::Uuid::new_v4().to_string(),
    };
    Node {
        id,
        title: String::new(),
        summary: String::new(),
        status: NodeStatus::Empty,
        level_name: level_name.to_string(),
        children: Vec::new(),
        metadata: NodeMetadata::now(),
    }
}
