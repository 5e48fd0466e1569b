// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// The evaluator fault of §7's taxonomy (`PleromaException` in the
/// original prototype). By design, fatal to the node when it surfaces
/// during a turn: turns are not retried, because re-executing a turn
/// that already had partial side effects is not idempotent.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("unknown entity definition {0:?}")]
    UnknownEntityDef(String),

    #[error("unknown function {function:?} on entity definition {def:?}")]
    UnknownFunction { def: String, function: String },

    #[error("module load failed: {0}")]
    ModuleLoad(String),

    #[error("evaluator fault: {0}")]
    Fault(String),
}
