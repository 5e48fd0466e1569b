// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_entity::Entity;
use pleroma_types::{PromiseId, ValueNode};

use crate::error::EvalError;
use crate::sink::{Continuation, SendSink};

/// What running a function against an entity produced, per §4.1: a
/// transportable value (or nothing), or a handle to a promise this same
/// vat already holds — the function itself made an asynchronous call and
/// is waiting on it, so no reply can be synthesized yet. The later
/// resolution of that promise is what triggers the reply (scenario 4,
/// §8).
#[derive(Debug)]
pub enum EvalOutcome {
    Value(Option<ValueNode>),
    Pending(PromiseId),
}

/// The three operations the vat turn loop consumes from the host
/// interpreter (spec §6). The lexer/parser/typechecker/AST evaluator
/// behind this trait are explicitly out of scope (§1) — this is only the
/// seam the core runtime calls through.
pub trait Evaluator: Send + Sync {
    /// Opaque per-entity state: module scope plus instance fields, owned
    /// by the entity's hosting vat for the entity's entire lifetime.
    type EntityState: Send;

    /// Instantiates the state for a freshly created entity of the named
    /// definition (used at bootstrap and whenever user code spawns a new
    /// entity — entity creation beyond the Monad is evaluator-internal
    /// and not further specified by the core).
    fn create_entity(&self, def_name: &str) -> Result<Self::EntityState, EvalError>;

    /// Synchronous invocation of `function_name` on `entity` with `args`
    /// (`eval_func_local`). Never blocks — the evaluator is synchronous
    /// and runs entirely within the calling burner thread (§5).
    fn eval_func_local(
        &self,
        ctx: &mut dyn SendSink,
        entity: &mut Entity<Self::EntityState>,
        function_name: &str,
        args: &[ValueNode],
    ) -> Result<EvalOutcome, EvalError>;

    /// Runs the continuation registered on a promise now that it has
    /// resolved (`eval_promise_local`).
    fn eval_promise_local(
        &self,
        ctx: &mut dyn SendSink,
        entity: &mut Entity<Self::EntityState>,
        continuation: Continuation,
        results: &[ValueNode],
    ) -> Result<(), EvalError>;
}
