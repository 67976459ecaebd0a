//! Shared fixtures for ops unit tests.

use crate::model::node::{Node, NodePath, NodeStatus, create_empty_node};
use crate::model::project::{Project, create_empty_project};

pub fn path(ids: &[&str]) -> NodePath {
    ids.iter().map(|s| s.to_string()).collect()
}

fn node(level: &str, id: &str, title: &str, summary: &str, status: NodeStatus) -> Node {
    let mut n = create_empty_node(level, Some(id));
    n.title = title.to_string();
    n.summary = summary.to_string();
    n.status = status;
    n
}

/// A small book outline:
///
/// ```text
/// root (Project)
/// ├── p1 Part "Beginnings"
/// │   ├── c1 Chapter "Opening"
/// │   │   ├── s1 Scene "Dawn" (complete)
/// │   │   └── s2 Scene (empty)
/// │   └── c2 Chapter "Call"
/// ├── p2 Part "Middle"
/// │   ├── c3 Chapter "Trials"
/// │   │   ├── s3 Scene "Cave"
/// │   │   ├── s4 Scene "River"
/// │   │   ├── s5 Scene "Bridge"
/// │   │   └── s6 Scene "Tower"
/// │   └── c4 Chapter (empty)
/// │       └── s7 Scene "Aftermath"
/// └── p3 Part (empty)
/// ```
pub fn sample_project() -> Project {
    use NodeStatus::*;

    let mut project = create_empty_project();
    project.title = "My Book".into();
    project.summary = "A hero's journey.".into();

    let mut c1 = node("Chapter", "c1", "Opening", "Hero at home", InProgress);
    c1.children = vec![
        node("Scene", "s1", "Dawn", "The village wakes", Complete),
        node("Scene", "s2", "", "", Empty),
    ];
    let mut p1 = node("Part", "p1", "Beginnings", "Setup", InProgress);
    p1.children = vec![c1, node("Chapter", "c2", "Call", "", InProgress)];

    let mut c3 = node("Chapter", "c3", "Trials", "Tests of will", InProgress);
    c3.children = vec![
        node("Scene", "s3", "Cave", "", InProgress),
        node("Scene", "s4", "River", "", InProgress),
        node("Scene", "s5", "Bridge", "", InProgress),
        node("Scene", "s6", "Tower", "", InProgress),
    ];
    let mut c4 = node("Chapter", "c4", "", "", Empty);
    c4.children = vec![node("Scene", "s7", "Aftermath", "Dust settles", InProgress)];
    let mut p2 = node("Part", "p2", "Middle", "", InProgress);
    p2.children = vec![c3, c4];

    let p3 = node("Part", "p3", "", "", Empty);

    project.root_node.children = vec![p1, p2, p3];
    project
}
