use indexmap::IndexMap;
use serde::Serialize;

use crate::model::node::{Node, NodeStatus};
use crate::model::project::Project;

/// Aggregate counts over a whole project tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_nodes: usize,
    pub complete_nodes: usize,
    pub in_progress_nodes: usize,
    pub empty_nodes: usize,
    /// Occurrences per level name, in first-seen (depth-first) order
    pub nodes_by_level: IndexMap<String, usize>,
    /// Deepest node depth (root = 0)
    pub max_depth_reached: usize,
    /// `round(100 * complete / total)`, 0 for an empty tree
    pub completion_percentage: u32,
}

/// Single depth-first pass over the tree, root included.
pub fn calculate_project_stats(project: &Project) -> ProjectStats {
    let mut stats = ProjectStats::default();
    count_nodes(&project.root_node, 0, &mut stats);
    stats.completion_percentage = completion_percentage(stats.complete_nodes, stats.total_nodes);
    stats
}

fn count_nodes(node: &Node, depth: usize, stats: &mut ProjectStats) {
    stats.total_nodes += 1;
    match node.status {
        NodeStatus::Complete => stats.complete_nodes += 1,
        NodeStatus::InProgress => stats.in_progress_nodes += 1,
        NodeStatus::Empty => stats.empty_nodes += 1,
    }
    *stats
        .nodes_by_level
        .entry(node.level_name.clone())
        .or_insert(0) += 1;
    stats.max_depth_reached = stats.max_depth_reached.max(depth);
    for child in &node.children {
        count_nodes(child, depth + 1, stats);
    }
}

fn completion_percentage(complete: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * complete as f64 / total as f64).round() as u32
}
