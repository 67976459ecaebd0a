//! Natural-language context assembly for AI prompts.
//!
//! The context describes a target node's place in the tree: project header,
//! the ancestor chain, siblings and children, and cousins. Output is capped
//! at a fixed character budget so prompt size stays bounded.
//!
//! Building never fails. An unresolved target degrades to the header alone.

use crate::model::config::ContextConfig;
use crate::model::node::Node;
use crate::model::project::Project;
use crate::ops::stats::calculate_project_stats;

/// Appended after a hard cut at the character budget
pub const TRUNCATION_MARKER: &str = "\n\n[Context truncated]";

/// How a node relates to the context target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Current,
    Parent,
    Grandparent,
    /// Any ancestor above the grandparent, short of the root
    Ancestor,
    Sibling,
    Child,
    /// Child of a sibling of the target's parent
    Cousin,
}

impl Relationship {
    pub fn tag(self) -> &'static str {
        match self {
            Relationship::Current => "CURRENT",
            Relationship::Parent => "PARENT",
            Relationship::Grandparent => "GRANDPARENT",
            Relationship::Ancestor => "ANCESTOR",
            Relationship::Sibling => "SIBLING",
            Relationship::Child => "CHILD",
            Relationship::Cousin => "COUSIN",
        }
    }
}

/// A node placed relative to the context target
#[derive(Debug, Clone, Copy)]
pub struct RelatedNode<'a> {
    pub node: &'a Node,
    pub relationship: Relationship,
    /// Depth in the tree (root = 0)
    pub depth: usize,
}

/// Classify the nodes around the target at `path`.
///
/// Order: the target, ancestors nearest-first (the root only appears as the
/// target itself), siblings, children, then cousins (at most
/// `cousins_per_uncle` per uncle, first in child order). Returns `None` when
/// the path does not resolve.
pub fn classify_relationships<'a>(
    root: &'a Node,
    path: &[String],
    cousins_per_uncle: usize,
) -> Option<Vec<RelatedNode<'a>>> {
    let mut chain = vec![root];
    let mut current = root;
    for id in path {
        current = current.child(id)?;
        chain.push(current);
    }
    let depth = path.len();
    let target = current;

    let mut related = vec![RelatedNode {
        node: target,
        relationship: Relationship::Current,
        depth,
    }];

    for d in (1..depth).rev() {
        let relationship = match depth - d {
            1 => Relationship::Parent,
            2 => Relationship::Grandparent,
            _ => Relationship::Ancestor,
        };
        related.push(RelatedNode {
            node: chain[d],
            relationship,
            depth: d,
        });
    }

    if depth >= 1 {
        let parent = chain[depth - 1];
        related.extend(
            parent
                .children
                .iter()
                .filter(|c| c.id != target.id)
                .map(|node| RelatedNode {
                    node,
                    relationship: Relationship::Sibling,
                    depth,
                }),
        );
    }

    related.extend(target.children.iter().map(|node| RelatedNode {
        node,
        relationship: Relationship::Child,
        depth: depth + 1,
    }));

    if depth >= 2 {
        let grandparent = chain[depth - 2];
        let parent = chain[depth - 1];
        for uncle in grandparent.children.iter().filter(|u| u.id != parent.id) {
            related.extend(uncle.children.iter().take(cousins_per_uncle).map(|node| {
                RelatedNode {
                    node,
                    relationship: Relationship::Cousin,
                    depth,
                }
            }));
        }
    }

    Some(related)
}

/// Builds bounded context strings for the text-generation boundary
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    config: ContextConfig,
}

impl ContextBuilder {
    pub fn new(config: ContextConfig) -> Self {
        ContextBuilder { config }
    }

    /// General context for content suggestions at the target node.
    pub fn build_smart_context(&self, project: &Project, path: &[String]) -> String {
        let mut sections = vec![header_section(project)];
        if let Some(related) =
            classify_relationships(&project.root_node, path, self.config.cousins_per_uncle)
        {
            sections.extend(relationship_sections(&related));
        }
        self.finish(sections)
    }

    /// General context plus a child-generation request block.
    pub fn build_child_generation_context(
        &self,
        project: &Project,
        path: &[String],
        child_level_name: &str,
    ) -> String {
        let header = header_section(project);
        let Some(related) =
            classify_relationships(&project.root_node, path, self.config.cousins_per_uncle)
        else {
            return self.finish(vec![header]);
        };

        let mut sections = vec![header];
        sections.extend(relationship_sections(&related));

        let target = related[0].node;
        sections.push(format!(
            "CHILD GENERATION REQUEST:\nGenerate {} entries for {} {}.\nParent summary: {}",
            child_level_name,
            target.level_name,
            quoted_title(target),
            if target.summary.trim().is_empty() {
                "(none)"
            } else {
                target.summary.trim()
            },
        ));

        if !target.children.is_empty() {
            let mut lines = vec!["EXISTING CHILDREN:".to_string()];
            for (i, child) in target.children.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, describe(child)));
            }
            sections.push(lines.join("\n"));
        }

        let patterns: Vec<String> = related
            .iter()
            .filter(|r| r.relationship == Relationship::Sibling && !r.node.children.is_empty())
            .take(self.config.sibling_patterns)
            .map(|r| {
                format!(
                    "- {} uses: {}",
                    quoted_title(r.node),
                    distinct_child_levels(r.node).join(", ")
                )
            })
            .collect();
        if !patterns.is_empty() {
            sections.push(format!("SIBLING PATTERNS:\n{}", patterns.join("\n")));
        }

        self.finish(sections)
    }

    fn finish(&self, sections: Vec<String>) -> String {
        let text = sections
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        truncate_context(text, self.config.max_chars)
    }
}

/// [`ContextBuilder::build_smart_context`] with default limits.
pub fn build_smart_context(project: &Project, path: &[String]) -> String {
    ContextBuilder::default().build_smart_context(project, path)
}

/// [`ContextBuilder::build_child_generation_context`] with default limits.
pub fn build_child_generation_context(
    project: &Project,
    path: &[String],
    child_level_name: &str,
) -> String {
    ContextBuilder::default().build_child_generation_context(project, path, child_level_name)
}

/// Hard cut at `max_chars` characters followed by [`TRUNCATION_MARKER`].
pub fn truncate_context(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = text[..cut].to_string();
            out.push_str(TRUNCATION_MARKER);
            out
        }
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn header_section(project: &Project) -> String {
    let title = if project.title.trim().is_empty() {
        "Untitled Fractal"
    } else {
        project.title.trim()
    };
    let mut lines = vec![format!("PROJECT: {}", title)];
    if !project.summary.trim().is_empty() {
        lines.push(format!("SUMMARY: {}", project.summary.trim()));
    }
    let stats = calculate_project_stats(project);
    lines.push(format!(
        "MAX DEPTH REACHED: {} (limit {})",
        stats.max_depth_reached, project.max_depth
    ));
    lines.join("\n")
}

/// Hierarchical, relational and structural sections, each omitted when empty
fn relationship_sections(related: &[RelatedNode<'_>]) -> Vec<String> {
    let mut hierarchy = Vec::new();
    let mut relational = Vec::new();
    let mut structural = Vec::new();

    for r in related {
        match r.relationship {
            Relationship::Current
            | Relationship::Parent
            | Relationship::Grandparent
            | Relationship::Ancestor => hierarchy.push(format!(
                "{} [{}] {}",
                ">".repeat(r.depth + 1),
                r.relationship.tag(),
                describe(r.node)
            )),
            Relationship::Sibling | Relationship::Child => relational.push(format!(
                "- {} {} [{}]",
                r.relationship.tag(),
                describe(r.node),
                r.node.status
            )),
            Relationship::Cousin => {
                structural.push(format!("- {} {}", r.relationship.tag(), describe(r.node)))
            }
        }
    }

    let mut sections = Vec::new();
    if !hierarchy.is_empty() {
        sections.push(format!("HIERARCHY:\n{}", hierarchy.join("\n")));
    }
    if !relational.is_empty() {
        sections.push(format!("RELATED NODES:\n{}", relational.join("\n")));
    }
    if !structural.is_empty() {
        sections.push(format!("STRUCTURAL CONTEXT:\n{}", structural.join("\n")));
    }
    sections
}

fn quoted_title(node: &Node) -> String {
    if node.title.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        format!("\"{}\"", node.title.trim())
    }
}

/// `Level: "Title" - summary`
fn describe(node: &Node) -> String {
    let mut line = format!("{}: {}", node.level_name, quoted_title(node));
    if !node.summary.trim().is_empty() {
        line.push_str(" - ");
        line.push_str(node.summary.trim());
    }
    line
}

fn distinct_child_levels(node: &Node) -> Vec<&str> {
    let mut levels: Vec<&str> = Vec::new();
    for child in &node.children {
        if !levels.contains(&child.level_name.as_str()) {
            levels.push(&child.level_name);
        }
    }
    levels
}
