pub mod config;
pub mod node;
pub mod project;

pub use config::*;
pub use node::*;
pub use project::*;
