// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::{HashMap, VecDeque};

use log::warn;
use pleroma_entity::Entity;
use pleroma_eval::{Continuation, EvalOutcome, Evaluator};
use pleroma_message::{synthesize_reply, Message, Promise};
use pleroma_types::PromiseId;

use crate::context::TurnContext;
use crate::error::VatError;

/// Result of running one turn: the network-bound messages produced
/// during flush (§4.1 phase 2). Same-vat messages never appear here —
/// they are re-delivered straight into `messages` before `turn` returns.
pub struct TurnReport {
    pub run_n: u64,
    pub net_out: Vec<Message>,
}

/// A vat: mailbox, owned entities and pending-promise table (§3). Single-
/// threaded while running — ownership is expressed by moving the value
/// itself between queues (ready queue, `net_vats`), never by locking its
/// interior (§5).
pub struct Vat<E: Evaluator> {
    pub id: i64,
    pub entities: HashMap<i64, Entity<E::EntityState>>,
    pub messages: VecDeque<Message>,
    pub out_messages: VecDeque<Message>,
    pub promises: HashMap<PromiseId, Promise<Continuation>>,
    pub run_n: u64,
    next_promise_id: PromiseId,
}

impl<E: Evaluator> Vat<E> {
    pub fn new(id: i64) -> Self {
        Vat {
            id,
            entities: HashMap::new(),
            messages: VecDeque::new(),
            out_messages: VecDeque::new(),
            promises: HashMap::new(),
            run_n: 0,
            next_promise_id: 0,
        }
    }

    pub fn has_pending_work(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn insert_entity(&mut self, entity: Entity<E::EntityState>) {
        self.entities.insert(entity.id, entity);
    }

    /// Runs one turn (§4.1): drain `messages` completely against the
    /// evaluator, then drain `out_messages`, re-delivering same-vat sends
    /// into `messages` and collecting everything else to be routed by
    /// the network thread.
    pub fn turn(&mut self, evaluator: &E, node_id: i64) -> Result<TurnReport, VatError> {
        while let Some(m) = self.messages.pop_front() {
            let vat_id = self.id;
            let entity = self
                .entities
                .get_mut(&m.dst.entity_id)
                .ok_or(VatError::RoutingFault {
                    vat_id,
                    entity_id: m.dst.entity_id,
                })?;
            let entity_id = entity.id;

            if m.is_response {
                self.dispatch_response(evaluator, node_id, entity_id, m)?;
            } else {
                self.dispatch_call(evaluator, node_id, entity_id, m)?;
            }
        }

        self.run_n += 1;
        let mut net_out = Vec::new();
        while let Some(m) = self.out_messages.pop_front() {
            if m.dst.node_id == node_id && m.dst.vat_id == self.id {
                self.messages.push_back(m);
            } else {
                net_out.push(m);
            }
        }

        Ok(TurnReport {
            run_n: self.run_n,
            net_out,
        })
    }

    fn dispatch_response(
        &mut self,
        evaluator: &E,
        node_id: i64,
        entity_id: i64,
        m: Message,
    ) -> Result<(), VatError> {
        let Some(mut promise) = self.promises.remove(&m.promise_id) else {
            // No matching promise: fire-and-forget response, or a
            // duplicate of one already resolved (§8 idempotence).
            return Ok(());
        };
        promise.resolve(m.values);

        if let Some(callback) = promise.callback.take() {
            let entity = self
                .entities
                .get_mut(&entity_id)
                .expect("entity looked up moments ago by the same key");
            let mut ctx = TurnContext::new(
                node_id,
                self.id,
                entity_id,
                &mut self.out_messages,
                &mut self.promises,
                &mut self.next_promise_id,
            );
            evaluator
                .eval_promise_local(&mut ctx, entity, callback, &promise.results)
                .map_err(|source| VatError::EvaluatorFault {
                    vat_id: self.id,
                    entity_id,
                    source,
                })?;
        }

        if promise.return_msg {
            if let Some(orig) = &promise.msg {
                if !orig.is_main() {
                    let reply = synthesize_reply(orig, promise.results.into_iter().next());
                    self.out_messages.push_back(reply);
                }
            }
        }

        Ok(())
    }

    fn dispatch_call(
        &mut self,
        evaluator: &E,
        node_id: i64,
        entity_id: i64,
        m: Message,
    ) -> Result<(), VatError> {
        let entity = self
            .entities
            .get_mut(&entity_id)
            .expect("entity looked up moments ago by the same key");
        let mut ctx = TurnContext::new(
            node_id,
            self.id,
            entity_id,
            &mut self.out_messages,
            &mut self.promises,
            &mut self.next_promise_id,
        );
        let outcome = evaluator
            .eval_func_local(&mut ctx, entity, &m.function_name, &m.values)
            .map_err(|source| VatError::EvaluatorFault {
                vat_id: self.id,
                entity_id,
                source,
            })?;

        match outcome {
            EvalOutcome::Pending(promise_id) => match self.promises.get_mut(&promise_id) {
                Some(promise) => {
                    promise.return_msg = true;
                    promise.msg = Some(m);
                }
                None => warn!(
                    "vat {}: evaluator returned pending promise {} with no matching entry",
                    self.id, promise_id
                ),
            },
            EvalOutcome::Value(v) => {
                if !m.is_main() {
                    let reply = synthesize_reply(&m, v);
                    self.out_messages.push_back(reply);
                }
            }
        }

        Ok(())
    }
}
