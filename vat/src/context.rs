// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::{HashMap, VecDeque};

use pleroma_eval::{Continuation, SendSink};
use pleroma_message::{Message, Promise};
use pleroma_types::{EntityAddress, PromiseId, ValueNode};

/// The per-turn evaluation context (§4.1: "construct an evaluation
/// context bound to this node, this vat, the entity's module scope, and
/// the target entity"). The module scope and target entity are passed to
/// the evaluator directly alongside this context; `TurnContext` is only
/// the part of that context that lets evaluation perform further sends.
///
/// Borrows straight into the owning [`crate::Vat`]'s `out_messages` and
/// `promises` for the duration of one dispatch step — it never outlives
/// the turn that created it.
pub struct TurnContext<'a> {
    node_id: i64,
    vat_id: i64,
    entity_id: i64,
    out_messages: &'a mut VecDeque<Message>,
    promises: &'a mut HashMap<PromiseId, Promise<Continuation>>,
    next_promise_id: &'a mut PromiseId,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        node_id: i64,
        vat_id: i64,
        entity_id: i64,
        out_messages: &'a mut VecDeque<Message>,
        promises: &'a mut HashMap<PromiseId, Promise<Continuation>>,
        next_promise_id: &'a mut PromiseId,
    ) -> Self {
        TurnContext {
            node_id,
            vat_id,
            entity_id,
            out_messages,
            promises,
            next_promise_id,
        }
    }

    fn mint_promise_id(&mut self) -> PromiseId {
        let id = *self.next_promise_id;
        *self.next_promise_id += 1;
        id
    }
}

impl<'a> SendSink for TurnContext<'a> {
    fn node_id(&self) -> i64 {
        self.node_id
    }

    fn vat_id(&self) -> i64 {
        self.vat_id
    }

    fn call(
        &mut self,
        dst: EntityAddress,
        function_name: &str,
        values: Vec<ValueNode>,
        callback: Option<Continuation>,
    ) -> PromiseId {
        let promise_id = self.mint_promise_id();
        let src = EntityAddress::new(self.node_id, self.vat_id, self.entity_id);
        let msg = Message {
            dst,
            src,
            function_name: function_name.to_owned(),
            promise_id,
            is_response: false,
            values,
        };
        self.out_messages.push_back(msg);

        let promise = match callback {
            Some(cb) => Promise::for_callback(cb),
            None => Promise {
                callback: None,
                return_msg: false,
                msg: None,
                results: Vec::new(),
            },
        };
        self.promises.insert(promise_id, promise);
        promise_id
    }
}
