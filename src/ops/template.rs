//! Built-in starting outlines for new projects.

use chrono::Utc;

use crate::model::config::LimitsConfig;
use crate::model::node::{Node, NodeMetadata, create_empty_node};
use crate::model::project::{Project, create_empty_project_with};
use crate::ops::status::get_auto_status;

/// A node in a template outline
#[derive(Debug, Clone, Copy)]
pub struct TemplateNode {
    pub level_name: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub children: &'static [TemplateNode],
}

/// A named, pre-populated project outline
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub nodes: &'static [TemplateNode],
}

const fn leaf(level_name: &'static str, title: &'static str) -> TemplateNode {
    TemplateNode {
        level_name,
        title,
        summary: "",
        children: &[],
    }
}

const BOOK: Template = Template {
    name: "book",
    description: "Three-act novel: parts, chapters and scenes",
    title: "Untitled Novel",
    summary: "",
    nodes: &[
        TemplateNode {
            level_name: "Part",
            title: "Act I",
            summary: "Setup: introduce the world and the protagonist.",
            children: &[leaf("Chapter", "Ordinary World"), leaf("Chapter", "Inciting Incident")],
        },
        TemplateNode {
            level_name: "Part",
            title: "Act II",
            summary: "Confrontation: rising stakes and the midpoint turn.",
            children: &[leaf("Chapter", "Trials"), leaf("Chapter", "Midpoint")],
        },
        TemplateNode {
            level_name: "Part",
            title: "Act III",
            summary: "Resolution: climax and aftermath.",
            children: &[leaf("Chapter", "Climax"), leaf("Chapter", "Resolution")],
        },
    ],
};

const SOFTWARE: Template = Template {
    name: "software",
    description: "Software delivery plan: milestones, features and tasks",
    title: "Untitled Software Project",
    summary: "",
    nodes: &[
        TemplateNode {
            level_name: "Milestone",
            title: "Discovery",
            summary: "Requirements, constraints and architecture sketch.",
            children: &[leaf("Feature", "Requirements"), leaf("Feature", "Architecture")],
        },
        TemplateNode {
            level_name: "Milestone",
            title: "MVP",
            summary: "Smallest release that delivers the core value.",
            children: &[leaf("Feature", "Core workflow")],
        },
        TemplateNode {
            level_name: "Milestone",
            title: "Launch",
            summary: "Hardening, documentation and release.",
            children: &[],
        },
    ],
};

const RESEARCH: Template = Template {
    name: "research",
    description: "Research paper: sections and subsections",
    title: "Untitled Paper",
    summary: "",
    nodes: &[
        leaf("Section", "Introduction"),
        TemplateNode {
            level_name: "Section",
            title: "Background",
            summary: "",
            children: &[leaf("Subsection", "Related Work")],
        },
        leaf("Section", "Method"),
        leaf("Section", "Results"),
        leaf("Section", "Discussion"),
    ],
};

const TEMPLATES: &[Template] = &[BOOK, SOFTWARE, RESEARCH];

/// All built-in templates
pub fn templates() -> &'static [Template] {
    TEMPLATES
}

/// Look up a template by name (case-insensitive).
pub fn find_template(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// Create a project pre-populated with the template's outline.
pub fn create_project_from_template(template: &Template, limits: &LimitsConfig) -> Project {
    let mut project = create_empty_project_with(limits);
    project.title = template.title.to_string();
    project.summary = template.summary.to_string();
    let now = Utc::now();
    project.root_node.children = template.nodes.iter().map(|t| build_node(t, now)).collect();
    project
}

fn build_node(template: &TemplateNode, now: chrono::DateTime<Utc>) -> Node {
    let mut node = create_empty_node(template.level_name, None);
    node.title = template.title.to_string();
    node.summary = template.summary.to_string();
    node.status = get_auto_status(&node.title, &node.summary, None);
    node.metadata = NodeMetadata {
        created: now,
        modified: now,
    };
    node.children = template.children.iter().map(|c| build_node(c, now)).collect();
    node
}
