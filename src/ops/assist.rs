//! Boundary to the external text-generation service.
//!
//! The core never talks to a model itself. It builds a context blob, hands a
//! request to a [`ContentAssistant`], and folds the response back into the
//! tree through the regular tree operations.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::config::ContextConfig;
use crate::model::project::Project;
use crate::ops::context::ContextBuilder;
use crate::ops::tree_ops::{
    find_node_by_path, format_path, handle_generate_children, update_node_content,
};

/// Outbound request for title/summary suggestions on one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub context: String,
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

/// Inbound suggestion. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Outbound request for a batch of children under one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildGenerationRequest {
    pub context: String,
    pub child_level_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

/// One generated child, in the order the service returned it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedChild {
    pub title: String,
    pub summary: String,
    pub level_name: String,
}

/// The external text-generation collaborator
pub trait ContentAssistant {
    type Error: std::error::Error;

    fn suggest_content(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, Self::Error>;

    fn generate_children(
        &self,
        request: &ChildGenerationRequest,
    ) -> Result<Vec<GeneratedChild>, Self::Error>;
}

/// Fold a suggestion into the node at `path`. Missing or blank fields leave
/// the node's current value alone.
pub fn apply_suggestion(project: &Project, path: &[String], response: &SuggestionResponse) -> Project {
    let title = response.title.as_deref().filter(|t| !t.trim().is_empty());
    let summary = response.summary.as_deref().filter(|s| !s.trim().is_empty());
    if title.is_none() && summary.is_none() {
        return project.clone();
    }
    update_node_content(project, path, title, summary)
}

/// Ask the assistant for content at `path` and apply it.
///
/// An unresolved path returns the project unchanged without calling out.
pub fn suggest_content<A: ContentAssistant>(
    project: &Project,
    path: &[String],
    assistant: &A,
    config: &ContextConfig,
    custom_prompt: Option<&str>,
) -> Result<Project, A::Error> {
    let Some(node) = find_node_by_path(&project.root_node, path) else {
        warn!("suggest skipped: node not found: {}", format_path(path));
        return Ok(project.clone());
    };
    let request = SuggestionRequest {
        context: ContextBuilder::new(config.clone()).build_smart_context(project, path),
        level: node.level_name.clone(),
        custom_prompt: custom_prompt.map(str::to_string),
    };
    let response = assistant.suggest_content(&request)?;
    Ok(apply_suggestion(project, path, &response))
}

/// Ask the assistant for children of `path` at `child_level_name` and
/// append them in order.
pub fn generate_children<A: ContentAssistant>(
    project: &Project,
    path: &[String],
    child_level_name: &str,
    assistant: &A,
    config: &ContextConfig,
    custom_prompt: Option<&str>,
) -> Result<Project, A::Error> {
    if find_node_by_path(&project.root_node, path).is_none() {
        warn!("generate skipped: node not found: {}", format_path(path));
        return Ok(project.clone());
    }
    let request = ChildGenerationRequest {
        context: ContextBuilder::new(config.clone()).build_child_generation_context(
            project,
            path,
            child_level_name,
        ),
        child_level_name: child_level_name.to_string(),
        custom_prompt: custom_prompt.map(str::to_string),
    };
    let children = assistant.generate_children(&request)?;
    Ok(handle_generate_children(project, path, &children))
}

/// Leniently read generated children out of arbitrary JSON.
///
/// Accepts a bare array or an object with a `children` array. Entries that
/// are not objects are dropped; missing strings become empty, and a missing
/// or blank `levelName` falls back to `fallback_level`.
pub fn parse_generated_children(value: &Value, fallback_level: &str) -> Vec<GeneratedChild> {
    let items: &[Value] = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("children") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                warn!("generated children payload has no `children` array");
                &[]
            }
        },
        _ => {
            warn!("generated children payload is not an array");
            &[]
        }
    };

    let mut children = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let Value::Object(map) = item else {
            warn!("dropping generated child #{}: not an object", i);
            continue;
        };
        let field = |key: &str| map.get(key).and_then(Value::as_str).unwrap_or("").to_string();
        let mut level_name = field("levelName");
        if level_name.trim().is_empty() {
            level_name = fallback_level.to_string();
        }
        children.push(GeneratedChild {
            title: field("title"),
            summary: field("summary"),
            level_name,
        });
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::NodeStatus;
    use crate::ops::test_helpers::{path, sample_project};
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Debug, thiserror::Error)]
    #[error("assistant offline")]
    struct Offline;

    /// Records requests and replays canned responses
    #[derive(Default)]
    struct FakeAssistant {
        offline: bool,
        suggestion: SuggestionResponse,
        children: Vec<GeneratedChild>,
        seen_levels: RefCell<Vec<String>>,
        seen_contexts: RefCell<Vec<String>>,
    }

    impl ContentAssistant for FakeAssistant {
        type Error = Offline;

        fn suggest_content(&self, request: &SuggestionRequest) -> Result<SuggestionResponse, Offline> {
            if self.offline {
                return Err(Offline);
            }
            self.seen_levels.borrow_mut().push(request.level.clone());
            self.seen_contexts.borrow_mut().push(request.context.clone());
            Ok(self.suggestion.clone())
        }

        fn generate_children(
            &self,
            request: &ChildGenerationRequest,
        ) -> Result<Vec<GeneratedChild>, Offline> {
            if self.offline {
                return Err(Offline);
            }
            self.seen_levels
                .borrow_mut()
                .push(request.child_level_name.clone());
            self.seen_contexts.borrow_mut().push(request.context.clone());
            Ok(self.children.clone())
        }
    }

    #[test]
    fn suggestion_applies_title_and_summary() {
        let project = sample_project();
        let assistant = FakeAssistant {
            suggestion: SuggestionResponse {
                title: Some("Dusk".into()),
                summary: Some("Night falls".into()),
            },
            ..Default::default()
        };
        let at = path(&["p1", "c1", "s2"]);
        let next = suggest_content(&project, &at, &assistant, &ContextConfig::default(), None).unwrap();
        let node = find_node_by_path(&next.root_node, &at).unwrap();
        assert_eq!(node.title, "Dusk");
        assert_eq!(node.summary, "Night falls");
        assert_eq!(node.status, NodeStatus::InProgress);
        assert_eq!(*assistant.seen_levels.borrow(), vec!["Scene".to_string()]);
        assert!(assistant.seen_contexts.borrow()[0].contains("[CURRENT]"));
    }

    #[test]
    fn partial_suggestion_keeps_other_field() {
        let project = sample_project();
        let at = path(&["p1", "c1"]);
        let next = apply_suggestion(
            &project,
            &at,
            &SuggestionResponse {
                title: None,
                summary: Some("Rewritten".into()),
            },
        );
        let node = find_node_by_path(&next.root_node, &at).unwrap();
        assert_eq!(node.title, "Opening");
        assert_eq!(node.summary, "Rewritten");
    }

    #[test]
    fn empty_suggestion_is_noop() {
        let project = sample_project();
        let next = apply_suggestion(&project, &path(&["p1"]), &SuggestionResponse::default());
        assert_eq!(next, project);
    }

    #[test]
    fn assistant_errors_propagate() {
        let project = sample_project();
        let assistant = FakeAssistant {
            offline: true,
            ..Default::default()
        };
        let result = suggest_content(&project, &path(&["p1"]), &assistant, &ContextConfig::default(), None);
        assert!(result.is_err());
    }

    #[test]
    fn unresolved_path_skips_the_call() {
        let project = sample_project();
        let assistant = FakeAssistant::default();
        let next = generate_children(
            &project,
            &path(&["ghost"]),
            "Chapter",
            &assistant,
            &ContextConfig::default(),
            None,
        )
        .unwrap();
        assert_eq!(next, project);
        assert!(assistant.seen_levels.borrow().is_empty());
    }

    #[test]
    fn generated_children_are_appended() {
        let project = sample_project();
        let assistant = FakeAssistant {
            children: vec![
                GeneratedChild {
                    title: "Arrival".into(),
                    summary: "They land".into(),
                    level_name: "Chapter".into(),
                },
                GeneratedChild {
                    title: "Departure".into(),
                    summary: String::new(),
                    level_name: "Chapter".into(),
                },
            ],
            ..Default::default()
        };
        let at = path(&["p3"]);
        let next = generate_children(
            &project,
            &at,
            "Chapter",
            &assistant,
            &ContextConfig::default(),
            Some("keep it short"),
        )
        .unwrap();
        let p3 = find_node_by_path(&next.root_node, &at).unwrap();
        let titles: Vec<&str> = p3.children.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Arrival", "Departure"]);
        assert!(assistant.seen_contexts.borrow()[0].contains("CHILD GENERATION REQUEST"));
    }

    #[test]
    fn parse_lenient_children() {
        let value = json!([
            {"title": "A", "summary": "a", "levelName": "Chapter"},
            "not an object",
            {"title": "B"},
            {"title": 3, "summary": "c", "levelName": "  "}
        ]);
        let children = parse_generated_children(&value, "Section");
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].level_name, "Chapter");
        assert_eq!(children[1].title, "B");
        assert_eq!(children[1].summary, "");
        assert_eq!(children[1].level_name, "Section");
        assert_eq!(children[2].title, "");
        assert_eq!(children[2].level_name, "Section");
    }

    #[test]
    fn parse_wrapped_children() {
        let value = json!({"children": [{"title": "X", "summary": "", "levelName": "Task"}]});
        let children = parse_generated_children(&value, "Step");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].level_name, "Task");

        assert!(parse_generated_children(&json!({"items": []}), "Step").is_empty());
        assert!(parse_generated_children(&json!("text"), "Step").is_empty());
    }

    #[test]
    fn request_wire_shape() {
        let request = ChildGenerationRequest {
            context: "ctx".into(),
            child_level_name: "Scene".into(),
            custom_prompt: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"context": "ctx", "childLevelName": "Scene"}));
    }
}
