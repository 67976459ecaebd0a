use std::sync::LazyLock;

use regex::Regex;

use crate::model::node::Node;
use crate::model::project::Project;

/// Deepest markdown heading level
const MAX_HEADING_LEVEL: usize = 6;

const FALLBACK_FILENAME: &str = "untitled-fractal.md";

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Render a project as a markdown document.
///
/// The project title is the `#` header, followed by its summary. Root's own
/// node is not repeated; each descendant at depth `d` (root's children are
/// depth 1) becomes a heading of `min(d + 1, 6)` `#` characters, followed by
/// its summary paragraph when non-empty.
pub fn export_to_markdown(project: &Project) -> String {
    let title = if project.title.trim().is_empty() {
        "Untitled Fractal"
    } else {
        project.title.trim()
    };
    let mut out = format!("# {}\n\n", title);
    if !project.summary.trim().is_empty() {
        out.push_str(project.summary.trim());
        out.push_str("\n\n");
    }
    for child in &project.root_node.children {
        render_node(child, 1, &mut out);
    }
    out
}

fn render_node(node: &Node, depth: usize, out: &mut String) {
    let level = (depth + 1).min(MAX_HEADING_LEVEL);
    out.push_str(&"#".repeat(level));
    out.push(' ');
    out.push_str(node.display_title().trim());
    out.push_str("\n\n");
    if !node.summary.trim().is_empty() {
        out.push_str(node.summary.trim());
        out.push_str("\n\n");
    }
    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

/// Download filename for a project: slugified title plus `.md`.
pub fn export_filename(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{}.md", slug)
    }
}
