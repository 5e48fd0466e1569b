// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_eval::EvalError;
use thiserror::Error;

/// Faults raised while executing a vat turn (§7's routing and evaluator
/// fault categories). Both are fatal: the burner that surfaces either one
/// terminates the process rather than retrying the turn, because a turn
/// with partial side effects already flushed is not safely re-executable.
#[derive(Debug, Error)]
pub enum VatError {
    #[error("vat {vat_id}: no such entity {entity_id}")]
    RoutingFault { vat_id: i64, entity_id: i64 },

    #[error("vat {vat_id}: evaluator fault while running entity {entity_id}: {source}")]
    EvaluatorFault {
        vat_id: i64,
        entity_id: i64,
        #[source]
        source: EvalError,
    },
}
