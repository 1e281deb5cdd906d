//! Processing gates stored in `outguard.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Outguard configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to the values the surrounding system
/// ships with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutguardConfig {
    /// Top-level result field holding the task's actual output.
    pub output_key: String,

    /// Validate results against runner and action schemas.
    pub validate_output: bool,

    /// Mask schema-marked secrets before results are displayed.
    pub mask_secrets: bool,
}

impl Default for OutguardConfig {
    fn default() -> Self {
        Self {
            output_key: "output".to_string(),
            validate_output: true,
            mask_secrets: true,
        }
    }
}

impl OutguardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output_key.trim().is_empty() {
            return Err(anyhow!("output_key must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `OutguardConfig::default()`.
pub fn load_config(path: &Path) -> Result<OutguardConfig> {
    if !path.exists() {
        let cfg = OutguardConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OutguardConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
