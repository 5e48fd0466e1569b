// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_types::ValueNode;

use crate::message::Message;

/// Per-vat record of a promise awaiting resolution (§3). Generic over the
/// continuation type `C` registered by the evaluator: this crate has no
/// opinion on what a "callback" is, only on the bookkeeping around it, so
/// the evaluator adapter crate supplies the concrete continuation type.
///
/// A promise is resolved at most once: the vat turn loop enforces this by
/// removing a promise from the table the moment it fires (§8 idempotence
/// property — dispatching the same response twice resolves the promise
/// once and is a no-op the second time, because the second response
/// finds no entry and is silently dropped per §4.1).
pub struct Promise<C> {
    /// Continuation to invoke with the resolved values, if the call site
    /// registered one (`eval_promise_local`, §6).
    pub callback: Option<C>,
    /// When set, resolving this promise also synthesizes and emits a
    /// reply to `msg` (§4.1).
    pub return_msg: bool,
    /// The call that created this promise, needed to synthesize a reply.
    /// Only meaningful when `return_msg` is set.
    pub msg: Option<Message>,
    /// The resolved values, populated exactly once.
    pub results: Vec<ValueNode>,
}

impl<C> Promise<C> {
    /// A promise created for a call that expects only the reply effect
    /// (no registered continuation) — the common "call and reply"
    /// shape of §4.1.
    pub fn for_reply(msg: Message) -> Self {
        Promise {
            callback: None,
            return_msg: true,
            msg: Some(msg),
            results: Vec::new(),
        }
    }

    /// A promise created with a continuation but no implicit reply
    /// (the caller consumes the result itself, e.g. `A.foo()` awaited
    /// in local evaluator code rather than relayed to a third party).
    pub fn for_callback(callback: C) -> Self {
        Promise {
            callback: Some(callback),
            return_msg: false,
            msg: None,
            results: Vec::new(),
        }
    }

    pub fn resolve(&mut self, values: Vec<ValueNode>) {
        self.results = values;
    }
}
