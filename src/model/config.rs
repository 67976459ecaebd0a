use serde::{Deserialize, Serialize};

/// Configuration from fractal.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

/// Caps applied to newly created projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_siblings")]
    pub max_siblings: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            max_depth: default_max_depth(),
            max_siblings: default_max_siblings(),
        }
    }
}

/// Bounds on the AI context blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Hard character cap before the truncation marker is appended
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_cousins_per_uncle")]
    pub cousins_per_uncle: usize,
    /// How many siblings contribute a child-level pattern hint
    #[serde(default = "default_sibling_patterns")]
    pub sibling_patterns: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            max_chars: default_max_chars(),
            cousins_per_uncle: default_cousins_per_uncle(),
            sibling_patterns: default_sibling_patterns(),
        }
    }
}

fn default_max_depth() -> usize {
    5
}

fn default_max_siblings() -> usize {
    10
}

fn default_max_chars() -> usize {
    8000
}

fn default_cousins_per_uncle() -> usize {
    3
}

fn default_sibling_patterns() -> usize {
    2
}
