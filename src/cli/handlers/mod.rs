mod init;
pub use init::cmd_init;

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::project_io::{self, ProjectError};
use crate::model::config::FractalConfig;
use crate::model::node::{Node, NodePath};
use crate::model::project::Project;
use crate::ops::assist::parse_generated_children;
use crate::ops::context::ContextBuilder;
use crate::ops::export::{export_filename, export_to_markdown};
use crate::ops::stats::calculate_project_stats;
use crate::ops::template::templates;
use crate::ops::tree_ops::{self, find_node_by_path, format_path};

/// Resolved global options shared by every command
pub struct Session {
    pub file: PathBuf,
    pub config: FractalConfig,
    pub json: bool,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref().map(Path::new), &cwd)?;
    let session = Session {
        file: PathBuf::from(&cli.file),
        config,
        json: cli.json,
    };
    debug!("using project file {}", session.file.display());

    match cli.command {
        Commands::Init(args) => cmd_init(args, &session),
        Commands::Templates => cmd_templates(&session),

        // Read commands
        Commands::Show => cmd_show(&session),
        Commands::Stats => cmd_stats(&session),
        Commands::Context(args) => cmd_context(args, &session),
        Commands::Export(args) => cmd_export(args, &session),

        // Write commands
        Commands::AddSibling(args) => cmd_add_sibling(args, &session),
        Commands::AddChild(args) => cmd_add_child(args, &session),
        Commands::Delete(args) => cmd_delete(args, &session),
        Commands::RenameLevel(args) => cmd_rename_level(args, &session),
        Commands::Edit(args) => cmd_edit(args, &session),
        Commands::Status(args) => cmd_status(args, &session),
        Commands::Info(args) => cmd_info(args, &session),
        Commands::Generate(args) => cmd_generate(args, &session),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load(session: &Session) -> Result<Project, ProjectError> {
    project_io::load_project_file(&session.file)
}

fn save(session: &Session, project: &Project) -> Result<(), ProjectError> {
    project_io::save_project_file(&session.file, project)
}

/// Resolve a user path (`/`-separated ids, each a full id or a unique
/// prefix among its siblings) to a full node path. `/` or `` is the root.
pub fn resolve_path(root: &Node, input: &str) -> Result<NodePath, String> {
    let mut path = Vec::new();
    let mut node = root;
    for segment in input.split('/').map(str::trim).filter(|s| !s.is_empty()) {
        let child = match node.child(segment) {
            Some(child) => child,
            None => {
                let matches: Vec<&Node> = node
                    .children
                    .iter()
                    .filter(|c| c.id.starts_with(segment))
                    .collect();
                match matches.as_slice() {
                    [only] => *only,
                    [] => {
                        path.push(segment.to_string());
                        return Err(format!("node not found: {}", format_path(&path)));
                    }
                    _ => {
                        return Err(format!(
                            "ambiguous id prefix '{}' under {} ({} matches)",
                            segment,
                            format_path(&path),
                            matches.len()
                        ));
                    }
                }
            }
        };
        path.push(child.id.clone());
        node = child;
    }
    Ok(path)
}

fn print_node(project: &Project, path: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let node = find_node_by_path(&project.root_node, path)
        .ok_or_else(|| format!("node not found: {}", format_path(path)))?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&node_to_json(node, &format_path(path)))?
        );
    } else {
        println!("{}  {}", format_path(path), format_node_line(node));
    }
    Ok(())
}

/// Path of the most recently appended child of `parent_path`.
fn last_child_path(project: &Project, parent_path: &[String]) -> Option<NodePath> {
    let parent = find_node_by_path(&project.root_node, parent_path)?;
    let last = parent.children.last()?;
    let mut path = parent_path.to_vec();
    path.push(last.id.clone());
    Some(path)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_templates(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    if session.json {
        let list: Vec<TemplateJson> = templates().iter().map(template_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        let width = templates().iter().map(|t| t.name.len()).max().unwrap_or(0);
        for t in templates() {
            println!("{:<width$}  {}", t.name, t.description, width = width);
        }
    }
    Ok(())
}

fn cmd_show(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    if session.json {
        println!("{}", serde_json::to_string_pretty(&project_to_json(&project))?);
    } else {
        for line in format_project_tree(&project) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let stats = calculate_project_stats(&project);
    if session.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for line in format_stats(&stats) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_context(args: ContextArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let path = resolve_path(&project.root_node, &args.path)?;
    let builder = ContextBuilder::new(session.config.context.clone());
    let context = match args.child_level.as_deref() {
        Some(level) => builder.build_child_generation_context(&project, &path, level),
        None => builder.build_smart_context(&project, &path),
    };
    if session.json {
        let out = ContextJson {
            path: format_path(&path),
            child_level_name: args.child_level,
            context,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", context);
    }
    Ok(())
}

fn cmd_export(args: ExportArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let markdown = export_to_markdown(&project);
    match args.output.as_deref() {
        None => print!("{}", markdown),
        Some(target) => {
            let target = if target == "auto" {
                PathBuf::from(export_filename(&project.title))
            } else {
                PathBuf::from(target)
            };
            project_io::write_text(&target, &markdown)?;
            println!("Exported {}", target.display());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add_sibling(args: AddSiblingArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let path = resolve_path(&project.root_node, &args.path)?;
    let next = tree_ops::try_add_sibling(&project, &path, &args.level)?;
    save(session, &next)?;

    let parent_path = &path[..path.len() - 1];
    let new_path = last_child_path(&next, parent_path)
        .ok_or_else(|| format!("node not found: {}", format_path(parent_path)))?;
    print_node(&next, &new_path, session.json)
}

fn cmd_add_child(args: AddChildArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let (target, level) = args.path_and_level();
    let project = load(session)?;
    let path = resolve_path(&project.root_node, target)?;
    let next = tree_ops::try_add_child_level(&project, &path, level)?;
    save(session, &next)?;

    let new_path = last_child_path(&next, &path)
        .ok_or_else(|| format!("node not found: {}", format_path(&path)))?;
    print_node(&next, &new_path, session.json)
}

fn cmd_delete(args: PathArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let path = resolve_path(&project.root_node, &args.path)?;
    let removed = find_node_by_path(&project.root_node, &path)
        .map(Node::subtree_len)
        .unwrap_or(0);
    let next = tree_ops::try_delete_node(&project, &path)?;
    save(session, &next)?;
    if !session.json {
        println!("Deleted {} ({} node(s))", format_path(&path), removed);
    }
    Ok(())
}

fn cmd_rename_level(args: RenameLevelArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let path = resolve_path(&project.root_node, &args.path)?;
    let next = tree_ops::try_update_node_level_name(&project, &path, &args.name)?;
    save(session, &next)?;
    print_node(&next, &path, session.json)
}

fn cmd_edit(args: EditArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    if args.title.is_none() && args.summary.is_none() {
        return Err("nothing to edit (pass --title and/or --summary)".into());
    }
    let project = load(session)?;
    let path = resolve_path(&project.root_node, &args.path)?;
    let next = tree_ops::try_update_node_content(
        &project,
        &path,
        args.title.as_deref(),
        args.summary.as_deref(),
    )?;
    save(session, &next)?;
    print_node(&next, &path, session.json)
}

fn cmd_status(args: StatusArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let path = resolve_path(&project.root_node, &args.path)?;
    let next = match args.state.as_deref() {
        Some(state) => tree_ops::try_set_node_status(&project, &path, parse_node_status(state)?)?,
        None => tree_ops::try_cycle_node_status(&project, &path)?,
    };
    save(session, &next)?;
    print_node(&next, &path, session.json)
}

fn cmd_info(args: InfoArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut project = load(session)?;
    if args.title.is_some() || args.summary.is_some() {
        project =
            tree_ops::update_project_info(&project, args.title.as_deref(), args.summary.as_deref());
        save(session, &project)?;
    }
    if session.json {
        #[derive(serde::Serialize)]
        struct InfoJson<'a> {
            title: &'a str,
            summary: &'a str,
        }
        let out = InfoJson {
            title: &project.title,
            summary: &project.summary,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_project_info(&project) {
            if !line.is_empty() {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

fn cmd_generate(args: GenerateArgs, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let project = load(session)?;
    let path = resolve_path(&project.root_node, &args.path)?;
    let text = fs::read_to_string(&args.from)
        .map_err(|e| format!("could not read {}: {}", args.from, e))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| format!("could not parse {}: {}", args.from, e))?;
    let children = parse_generated_children(&value, &args.level);

    let before = find_node_by_path(&project.root_node, &path)
        .map(|n| n.children.len())
        .unwrap_or(0);
    let next = tree_ops::handle_generate_children(&project, &path, &children);
    let node = find_node_by_path(&next.root_node, &path)
        .ok_or_else(|| format!("node not found: {}", format_path(&path)))?;
    let added = node.children.len() - before;
    save(session, &next)?;

    if session.json {
        let new: Vec<NodeJson> = node.children[before..]
            .iter()
            .map(|c| {
                let mut child_path = path.clone();
                child_path.push(c.id.clone());
                node_to_json(c, &format_path(&child_path))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&new)?);
    } else {
        for child in &node.children[before..] {
            println!("{}", format_node_line(child));
        }
        if added < children.len() {
            eprintln!(
                "added {} of {} generated children (limits reached)",
                added,
                children.len()
            );
        }
    }
    Ok(())
}
