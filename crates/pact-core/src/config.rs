//! Configuration file loading for pact.
//!
//! Reads `.pact/pact.json` and provides typed access to all settings.
//! Falls back to defaults when the config file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level pact configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PactConfig {
    #[serde(default)]
    pub signature: SignatureConfig,
    #[serde(default)]
    pub enforce: EnforceConfig,
}

/// Signature compatibility tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureConfig {
    /// Reject a candidate that accepts `**kwargs` the interface does not declare.
    #[serde(default = "default_true")]
    pub strict_var_keyword: bool,
    /// Let a candidate `*args` stand in for trailing required positionals.
    #[serde(default = "default_true")]
    pub absorb_with_var_positional: bool,
}

/// Checks run alongside `implement`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforceConfig {
    /// Forbid redefining an interface's final methods even without subclassing it.
    #[serde(default = "default_true")]
    pub interface_finals: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            strict_var_keyword: true,
            absorb_with_var_positional: true,
        }
    }
}

impl Default for EnforceConfig {
    fn default() -> Self {
        Self {
            interface_finals: true,
        }
    }
}

impl PactConfig {
    /// Load configuration from `pact.json` inside the given pact directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(pact_dir: &Path) -> Self {
        let config_path = pact_dir.join("pact.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse pact config, using defaults"
                );
                Self::default()
            }
        }
    }
}
