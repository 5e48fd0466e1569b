// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_types::{EntityAddress, PromiseId, ValueNode};

/// A continuation registered against a promise, to be run with the
/// resolved values when the matching response arrives (`eval_promise_local`
/// in spec §6). The real interpreter's continuation closes over AST scope
/// and call-stack state; since the evaluator is an out-of-scope black box
/// (spec §1), this crate represents it abstractly as a boxed closure —
/// enough to drive the turn loop's promise-resolution path (§4.1) without
/// modelling interpreter internals.
pub type Continuation = Box<dyn FnOnce(&[ValueNode]) + Send>;

/// The per-turn handle the vat scheduler hands to the evaluator so that
/// evaluating a function body can itself make further asynchronous calls
/// (§4.1's "construct an evaluation context bound to this node, this vat,
/// the entity's module scope, and the target entity" — the module scope
/// and entity are passed alongside as ordinary arguments; this trait is
/// the part of that context that lets evaluation perform sends).
///
/// Implemented by the vat crate's turn context; kept as a trait object
/// here so this crate never needs to depend on the vat crate.
pub trait SendSink {
    fn node_id(&self) -> i64;
    fn vat_id(&self) -> i64;

    /// Enqueues an asynchronous call to `dst` and mints the `promise_id`
    /// for it (§3: "`PromiseId` ... minted by the vat that originates a
    /// call"). If `callback` is set it is registered against the new
    /// promise so a later response fires it (`eval_promise_local`).
    fn call(
        &mut self,
        dst: EntityAddress,
        function_name: &str,
        values: Vec<ValueNode>,
        callback: Option<Continuation>,
    ) -> PromiseId;
}
