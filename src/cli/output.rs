use serde::Serialize;

use crate::model::node::{Node, NodeStatus};
use crate::model::project::Project;
use crate::ops::stats::ProjectStats;
use crate::ops::template::Template;
use crate::util::unicode::{single_line, truncate_to_width};

/// Ids are shown shortened in human output; any unique prefix resolves.
pub const SHORT_ID_LEN: usize = 8;

const SUMMARY_WIDTH: usize = 60;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeJson {
    pub id: String,
    pub path: String,
    pub level_name: String,
    pub title: String,
    pub summary: String,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeJson>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectJson {
    pub title: String,
    pub summary: String,
    pub max_depth: usize,
    pub max_siblings: usize,
    pub root: NodeJson,
}

#[derive(Serialize)]
pub struct TemplateJson {
    pub name: String,
    pub description: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextJson {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_level_name: Option<String>,
    pub context: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert a node and its subtree. `path` is the node's own path string.
pub fn node_to_json(node: &Node, path: &str) -> NodeJson {
    NodeJson {
        id: node.id.clone(),
        path: path.to_string(),
        level_name: node.level_name.clone(),
        title: node.title.clone(),
        summary: node.summary.clone(),
        status: node.status,
        children: node
            .children
            .iter()
            .map(|c| node_to_json(c, &child_path(path, &c.id)))
            .collect(),
    }
}

pub fn project_to_json(project: &Project) -> ProjectJson {
    ProjectJson {
        title: project.title.clone(),
        summary: project.summary.clone(),
        max_depth: project.max_depth,
        max_siblings: project.max_siblings,
        root: node_to_json(&project.root_node, "/"),
    }
}

pub fn template_to_json(template: &Template) -> TemplateJson {
    TemplateJson {
        name: template.name.to_string(),
        description: template.description.to_string(),
    }
}

fn child_path(parent: &str, id: &str) -> String {
    if parent == "/" {
        id.to_string()
    } else {
        format!("{}/{}", parent, id)
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Format a single node as a one-line summary
pub fn format_node_line(node: &Node) -> String {
    let summary = single_line(&node.summary);
    let summary_str = if summary.is_empty() {
        String::new()
    } else {
        format!(" - {}", truncate_to_width(&summary, SUMMARY_WIDTH))
    };
    format!(
        "[{}] {} {}: {}{}",
        node.status.checkbox_char(),
        short_id(&node.id),
        node.level_name,
        node.display_title(),
        summary_str
    )
}

/// Format a node with its descendants, indented
pub fn format_node_tree(node: &Node, indent: usize) -> Vec<String> {
    let mut lines = vec![format!("{}{}", "  ".repeat(indent), format_node_line(node))];
    for child in &node.children {
        lines.extend(format_node_tree(child, indent + 1));
    }
    lines
}

/// Project header followed by the outline of the root's children
pub fn format_project_tree(project: &Project) -> Vec<String> {
    let mut lines = format_project_info(project);
    if project.root_node.children.is_empty() {
        lines.push("(no nodes yet; try `fractal add-child <LEVEL>`)".to_string());
    }
    for child in &project.root_node.children {
        lines.extend(format_node_tree(child, 0));
    }
    lines
}

pub fn format_project_info(project: &Project) -> Vec<String> {
    let mut lines = vec![if project.title.trim().is_empty() {
        "Untitled Project".to_string()
    } else {
        project.title.clone()
    }];
    if !project.summary.trim().is_empty() {
        lines.push(format!("> {}", single_line(&project.summary)));
    }
    lines.push(String::new());
    lines
}

pub fn format_stats(stats: &ProjectStats) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} nodes: {} complete, {} in progress, {} empty",
            stats.total_nodes, stats.complete_nodes, stats.in_progress_nodes, stats.empty_nodes
        ),
        format!("completion: {}%", stats.completion_percentage),
        format!("deepest level: {}", stats.max_depth_reached),
        String::new(),
        "by level:".to_string(),
    ];
    let width = stats.nodes_by_level.keys().map(|k| k.len()).max().unwrap_or(0);
    for (level, count) in &stats.nodes_by_level {
        lines.push(format!("  {:<width$}  {}", level, count, width = width));
    }
    lines
}

pub fn parse_node_status(s: &str) -> Result<NodeStatus, String> {
    NodeStatus::parse(s).ok_or_else(|| {
        format!(
            "invalid status: '{}' (expected empty, in-progress, complete)",
            s
        )
    })
}
