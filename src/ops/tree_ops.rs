use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::model::node::{Node, NodeStatus, create_empty_node};
use crate::model::project::Project;
use crate::ops::assist::GeneratedChild;
use crate::ops::status::{cycle_status, get_auto_status};

/// Error type for strict tree operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("node not found: {0}")]
    NotFound(String),
    #[error("the root node has no siblings")]
    RootHasNoSiblings,
    #[error("the root node cannot be deleted")]
    CannotDeleteRoot,
    #[error("cannot add child: maximum depth ({0}) reached")]
    MaxDepthReached(usize),
    #[error("cannot add node: maximum siblings ({0}) reached")]
    MaxSiblingsReached(usize),
    #[error("level name must not be blank")]
    EmptyLevelName,
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Walk child-id lookups from `root`. An empty path yields the root.
pub fn find_node_by_path<'a>(root: &'a Node, path: &[String]) -> Option<&'a Node> {
    path.iter().try_fold(root, |node, id| node.child(id))
}

pub fn find_node_by_path_mut<'a>(root: &'a mut Node, path: &[String]) -> Option<&'a mut Node> {
    let mut node = root;
    for id in path {
        node = node.child_mut(id)?;
    }
    Some(node)
}

/// Render a path for messages: `/` for the root, `a/b/c` otherwise.
pub fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.join("/")
    }
}

// ---------------------------------------------------------------------------
// Structural mutations (strict)
// ---------------------------------------------------------------------------

/// Append an empty sibling after the node at `path`, under the same parent.
pub fn try_add_sibling(
    project: &Project,
    path: &[String],
    level_name: &str,
) -> Result<Project, TreeError> {
    let Some((_, parent_path)) = path.split_last() else {
        return Err(TreeError::RootHasNoSiblings);
    };
    let max_siblings = project.max_siblings;
    ensure_exists(project, path)?;
    edit_at(project, parent_path, |parent| {
        if parent.children.len() >= max_siblings {
            return Err(TreeError::MaxSiblingsReached(max_siblings));
        }
        parent.children.push(create_empty_node(level_name, None));
        Ok(())
    })
}

/// Append an empty child to the node at `path`.
pub fn try_add_child_level(
    project: &Project,
    path: &[String],
    level_name: &str,
) -> Result<Project, TreeError> {
    let max_depth = project.max_depth;
    let max_siblings = project.max_siblings;
    edit_at(project, path, |node| {
        if path.len() >= max_depth {
            return Err(TreeError::MaxDepthReached(max_depth));
        }
        if node.children.len() >= max_siblings {
            return Err(TreeError::MaxSiblingsReached(max_siblings));
        }
        node.children.push(create_empty_node(level_name, None));
        Ok(())
    })
}

/// Remove the node at `path` (and its subtree) from its parent.
pub fn try_delete_node(project: &Project, path: &[String]) -> Result<Project, TreeError> {
    let Some((id, parent_path)) = path.split_last() else {
        return Err(TreeError::CannotDeleteRoot);
    };
    ensure_exists(project, path)?;
    edit_at(project, parent_path, |parent| {
        parent.children.retain(|c| &c.id != id);
        Ok(())
    })
}

pub fn try_update_node_level_name(
    project: &Project,
    path: &[String],
    new_name: &str,
) -> Result<Project, TreeError> {
    let name = new_name.trim();
    if name.is_empty() {
        return Err(TreeError::EmptyLevelName);
    }
    edit_at(project, path, |node| {
        node.level_name = name.to_string();
        Ok(())
    })
}

/// Replace title and/or summary and re-derive status. A node that is
/// `Complete` stays complete.
pub fn try_update_node_content(
    project: &Project,
    path: &[String],
    title: Option<&str>,
    summary: Option<&str>,
) -> Result<Project, TreeError> {
    edit_at(project, path, |node| {
        if let Some(title) = title {
            node.title = title.to_string();
        }
        if let Some(summary) = summary {
            node.summary = summary.to_string();
        }
        node.status = get_auto_status(&node.title, &node.summary, Some(node.status));
        Ok(())
    })
}

pub fn try_set_node_status(
    project: &Project,
    path: &[String],
    status: NodeStatus,
) -> Result<Project, TreeError> {
    edit_at(project, path, |node| {
        node.status = status;
        Ok(())
    })
}

pub fn try_cycle_node_status(project: &Project, path: &[String]) -> Result<Project, TreeError> {
    edit_at(project, path, |node| {
        node.status = cycle_status(node.status);
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Structural mutations (best effort)
// ---------------------------------------------------------------------------

/// Best-effort [`try_add_sibling`]: returns the input unchanged on failure.
pub fn add_sibling(project: &Project, path: &[String], level_name: &str) -> Project {
    or_unchanged("add sibling", project, path, try_add_sibling(project, path, level_name))
}

/// Best-effort [`try_add_child_level`]: returns the input unchanged on failure.
pub fn add_child_level(project: &Project, path: &[String], level_name: &str) -> Project {
    or_unchanged(
        "add child",
        project,
        path,
        try_add_child_level(project, path, level_name),
    )
}

/// Best-effort [`try_delete_node`]: returns the input unchanged on failure.
pub fn delete_node(project: &Project, path: &[String]) -> Project {
    or_unchanged("delete", project, path, try_delete_node(project, path))
}

pub fn update_node_level_name(project: &Project, path: &[String], new_name: &str) -> Project {
    or_unchanged(
        "rename level",
        project,
        path,
        try_update_node_level_name(project, path, new_name),
    )
}

pub fn update_node_content(
    project: &Project,
    path: &[String],
    title: Option<&str>,
    summary: Option<&str>,
) -> Project {
    or_unchanged(
        "update content",
        project,
        path,
        try_update_node_content(project, path, title, summary),
    )
}

pub fn set_node_status(project: &Project, path: &[String], status: NodeStatus) -> Project {
    or_unchanged(
        "set status",
        project,
        path,
        try_set_node_status(project, path, status),
    )
}

pub fn cycle_node_status(project: &Project, path: &[String]) -> Project {
    or_unchanged(
        "cycle status",
        project,
        path,
        try_cycle_node_status(project, path),
    )
}

/// Set the project's own title and/or summary.
pub fn update_project_info(project: &Project, title: Option<&str>, summary: Option<&str>) -> Project {
    let mut next = project.clone();
    if let Some(title) = title {
        next.title = title.to_string();
    }
    if let Some(summary) = summary {
        next.summary = summary.to_string();
    }
    next.touch(Utc::now());
    next
}

/// Append AI-generated children under the node at `path`, in input order.
///
/// Each entry goes through [`add_child_level`] and the freshly appended child
/// then receives the entry's title and summary. Entries with a blank level
/// name are skipped. Stops at the first entry the caps reject.
pub fn handle_generate_children(
    project: &Project,
    path: &[String],
    children: &[GeneratedChild],
) -> Project {
    let mut current = project.clone();
    for child in children {
        let level = child.level_name.trim();
        if level.is_empty() {
            warn!("skipping generated child with blank level name: {:?}", child.title);
            continue;
        }
        let Some(before) = find_node_by_path(&current.root_node, path).map(|n| n.children.len())
        else {
            debug!("generate children skipped: node not found: {}", format_path(path));
            return current;
        };

        let next = add_child_level(&current, path, level);
        let new_id = find_node_by_path(&next.root_node, path)
            .filter(|n| n.children.len() > before)
            .and_then(|n| n.children.last())
            .map(|c| c.id.clone());
        let Some(new_id) = new_id else {
            debug!("generate children stopped at cap under {}", format_path(path));
            break;
        };

        let mut child_path = path.to_vec();
        child_path.push(new_id);
        current = update_node_content(
            &next,
            &child_path,
            Some(&child.title),
            Some(&child.summary),
        );
    }
    current
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clone the project, apply `edit` to the node at `path`, then refresh the
/// modified stamp on every node from the root down to it and on the project.
fn edit_at<F>(project: &Project, path: &[String], edit: F) -> Result<Project, TreeError>
where
    F: FnOnce(&mut Node) -> Result<(), TreeError>,
{
    ensure_exists(project, path)?;
    let mut next = project.clone();
    let node = find_node_by_path_mut(&mut next.root_node, path)
        .ok_or_else(|| TreeError::NotFound(format_path(path)))?;
    edit(node)?;

    let now = Utc::now();
    touch_path(&mut next.root_node, path, now);
    next.touch(now);
    Ok(next)
}

fn ensure_exists(project: &Project, path: &[String]) -> Result<(), TreeError> {
    match find_node_by_path(&project.root_node, path) {
        Some(_) => Ok(()),
        None => Err(TreeError::NotFound(format_path(path))),
    }
}

fn touch_path(root: &mut Node, path: &[String], now: DateTime<Utc>) {
    let mut node = root;
    node.touch(now);
    for id in path {
        match node.child_mut(id) {
            Some(child) => {
                child.touch(now);
                node = child;
            }
            None => return,
        }
    }
}

fn or_unchanged(
    action: &str,
    project: &Project,
    path: &[String],
    result: Result<Project, TreeError>,
) -> Project {
    result.unwrap_or_else(|e| {
        debug!("{} at {} skipped: {}", action, format_path(path), e);
        project.clone()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
