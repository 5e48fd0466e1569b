// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use crate::error::EvalError;

/// A loaded module: a named collection of entity definitions, keyed by
/// name (spec §6). The definitions themselves are evaluator-internal;
/// the core only needs to know which names exist, to validate
/// `--entity` at bootstrap and to report a clear error rather than
/// routing to a definition that was never loaded.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub name: String,
    pub entity_defs: Vec<String>,
}

impl Module {
    pub fn has_entity_def(&self, name: &str) -> bool {
        self.entity_defs.iter().any(|d| d == name)
    }
}

/// The module/program loader interface consumed by node bootstrap (§6).
/// Parsing, typechecking and the rest of the surface-language front end
/// live behind this trait and are out of scope for the core (§1).
pub trait ModuleLoader: Send + Sync {
    /// Loads a compiled-in system module by name, e.g. the kernel or the
    /// `Monad` module (§4.5 step 2).
    fn load_system_module(&self, name: &str) -> Result<Module, EvalError>;

    /// Loads and parses a user program file (§4.5 step 2, and the `test
    /// <file>` CLI subcommand, §6).
    fn load_file(&self, path: &Path) -> Result<Module, EvalError>;
}
