// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read node config {0:?}: {1}")]
    Read(String, #[source] std::io::Error),
    #[error("could not parse node config {0:?}: {1}")]
    Parse(String, #[source] serde_json::Error),
}
