use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::cli::handlers::Session;
use crate::io::project_io::{self, ProjectError};
use crate::model::project::create_empty_project_with;
use crate::ops::template::{create_project_from_template, find_template, templates};
use crate::ops::tree_ops::update_project_info;

/// Title-case a directory name: "my-cool-novel" -> "My Cool Novel".
fn infer_title(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The directory a relative or absolute project file lives in.
fn project_dir_name(file: &Path) -> Option<String> {
    let dir = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir().ok()?,
    };
    let dir = std::fs::canonicalize(&dir).unwrap_or(dir);
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
}

pub fn cmd_init(args: InitArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let file = session.file.as_path();
    if file.exists() && !args.force {
        return Err(ProjectError::AlreadyExists(file.to_path_buf()).into());
    }

    let project = match args.template.as_deref() {
        Some(name) => {
            let template = find_template(name).ok_or_else(|| {
                let known: Vec<&str> = templates().iter().map(|t| t.name).collect();
                format!(
                    "unknown template '{}' (available: {})",
                    name,
                    known.join(", ")
                )
            })?;
            create_project_from_template(template, &session.config.limits)
        }
        None => {
            let mut project = create_empty_project_with(&session.config.limits);
            project.title = project_dir_name(file)
                .map(|n| infer_title(&n))
                .unwrap_or_default();
            project
        }
    };
    let project = update_project_info(&project, args.title.as_deref(), args.summary.as_deref());

    project_io::save_project_file(file, &project)?;
    if session.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&crate::cli::output::project_to_json(&project))?
        );
    } else {
        println!("Created {}", file.display());
    }
    Ok(())
}
