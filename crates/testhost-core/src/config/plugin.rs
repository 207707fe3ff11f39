//! Plugin module configuration.

use serde::{Deserialize, Serialize};

/// Which candidate modules the host offers to the plugin loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Module names, in the order their contributions should merge.
    #[serde(default)]
    pub require: Vec<String>,
    /// Whether an unknown module name aborts startup instead of being skipped.
    #[serde(default = "default_true")]
    pub fail_on_unknown: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            require: Vec::new(),
            fail_on_unknown: true,
        }
    }
}

fn default_true() -> bool {
    true
}
