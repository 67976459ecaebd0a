use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::LimitsConfig;
use super::node::{Node, ROOT_ID, create_empty_node};

/// Version tag stamped into every new project's metadata
pub const FRACTAL_VERSION: &str = "1.0";

/// Level name given to the root node of a new project
pub const ROOT_LEVEL_NAME: &str = "Project";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    /// Opaque version tag for the persistence layer
    pub version: String,
}

/// A fractal project: owns exactly one node tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub root_node: Node,
    /// Soft cap on depth (root = 0)
    pub max_depth: usize,
    /// Soft cap on the number of children of any node
    pub max_siblings: usize,
    pub metadata: ProjectMetadata,
}

impl Project {
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.metadata.modified = now;
    }
}

/// Create a project holding a single empty root, with the default caps.
pub fn create_empty_project() -> Project {
    create_empty_project_with(&LimitsConfig::default())
}

/// Create a project holding a single empty root, with caps from `limits`.
pub fn create_empty_project_with(limits: &LimitsConfig) -> Project {
    let root = create_empty_node(ROOT_LEVEL_NAME, Some(ROOT_ID));
    let now = root.metadata.created;
    Project {
        title: String::new(),
        summary: String::new(),
        root_node: root,
        max_depth: limits.max_depth,
        max_siblings: limits.max_siblings,
        metadata: ProjectMetadata {
            created: now,
            modified: now,
            version: FRACTAL_VERSION.to_string(),
        },
    }
}
