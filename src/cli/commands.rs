use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fractal", about = concat!("fractal v", env!("CARGO_PKG_VERSION"), " - plan top-down, one level at a time"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project file to operate on
    #[arg(short = 'f', long = "file", global = true, default_value = crate::io::project_io::DEFAULT_PROJECT_FILE)]
    pub file: String,

    /// Config file (default: fractal.toml in the current directory, if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level for stderr diagnostics (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project file
    Init(InitArgs),
    /// List built-in templates
    Templates,
    /// Show the outline tree
    Show,
    /// Append a sibling after a node
    AddSibling(AddSiblingArgs),
    /// Append a child under a node
    AddChild(AddChildArgs),
    /// Delete a node and its subtree
    Delete(PathArgs),
    /// Rename a node's level
    RenameLevel(RenameLevelArgs),
    /// Edit a node's title or summary
    Edit(EditArgs),
    /// Set a node's status, or cycle it when no state is given
    Status(StatusArgs),
    /// Show or edit the project title and summary
    Info(InfoArgs),
    /// Show project statistics
    Stats,
    /// Print the generation context for a node
    Context(ContextArgs),
    /// Export the outline as markdown
    Export(ExportArgs),
    /// Add generated children from a JSON file
    Generate(GenerateArgs),
}

// ---------------------------------------------------------------------------
// Project args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Project title
    #[arg(long)]
    pub title: Option<String>,
    /// Project summary
    #[arg(long)]
    pub summary: Option<String>,
    /// Start from a built-in template (see `fractal templates`)
    #[arg(long)]
    pub template: Option<String>,
    /// Overwrite an existing project file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// New project title
    #[arg(long)]
    pub title: Option<String>,
    /// New project summary
    #[arg(long)]
    pub summary: Option<String>,
}

// ---------------------------------------------------------------------------
// Node args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct PathArgs {
    /// Node path: slash-separated ids, each may be a unique prefix
    pub path: String,
}

#[derive(Args)]
pub struct AddSiblingArgs {
    /// Node to add the sibling after
    pub path: String,
    /// Level name for the new node
    pub level: String,
}

#[derive(Args)]
pub struct AddChildArgs {
    /// Parent node, or the level name when adding under the root
    #[arg(value_name = "PATH")]
    pub first: String,
    /// Level name for the new node
    #[arg(value_name = "LEVEL")]
    pub second: Option<String>,
}

impl AddChildArgs {
    /// Split positional args into `(path, level)`; a lone arg is the level.
    pub fn path_and_level(&self) -> (&str, &str) {
        match &self.second {
            Some(level) => (&self.first, level),
            None => ("/", &self.first),
        }
    }
}

#[derive(Args)]
pub struct RenameLevelArgs {
    pub path: String,
    /// New level name
    pub name: String,
}

#[derive(Args)]
pub struct EditArgs {
    pub path: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New summary
    #[arg(long)]
    pub summary: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    pub path: String,
    /// New state (empty, in-progress, complete); cycles when omitted
    pub state: Option<String>,
}

#[derive(Args)]
pub struct ContextArgs {
    /// Target node (default: the root)
    #[arg(default_value = "/")]
    pub path: String,
    /// Build a child-generation context for this level instead
    #[arg(long = "child-level")]
    pub child_level: Option<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout; `-o auto` derives a name from the title
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Parent node for the generated children
    pub path: String,
    /// JSON file holding an array of children or `{"children": [...]}`
    #[arg(long)]
    pub from: String,
    /// Level name for entries that do not carry one
    #[arg(long, default_value = "Item")]
    pub level: String,
}
