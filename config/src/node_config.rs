// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Node configuration (§6): `{ "name": string, "resources": [string],
/// ... }`. Unknown keys are ignored — we simply never look at them,
/// which is serde's default behavior without `deny_unknown_fields`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub name: String,
    pub resources: Vec<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            name: "pleroma-node".to_owned(),
            resources: Vec::new(),
        }
    }
}

impl NodeConfig {
    /// Reads and parses the node config file (§4.5 step 1, §7 config
    /// fault). A missing or invalid file is fatal before bootstrap
    /// completes — the caller is expected to log and exit.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e))
    }
}
