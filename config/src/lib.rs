// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod cli;
mod error;
mod node_config;

pub use cli::{Opt, StartOpt};
pub use error::ConfigError;
pub use node_config::NodeConfig;
