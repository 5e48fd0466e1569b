// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use pleroma_message::Message;
use pleroma_types::{EntityAddress, PromiseId, ValueNode};

/// The on-the-wire shape of a [`Message`] (§4.4). Field layout mirrors
/// the original prototype's envelope (`node_id`/`vat_id`/`entity_id` and
/// their `src_` counterparts, `promise_id`, `response`, a value list) —
/// one difference: the prototype serialized the function name twice
/// (`function_id` and `src_function_id`, always equal) and its receive
/// path never read either back, dropping the call's selector on the
/// floor. There is only one function name in the domain model (§3), so
/// this envelope carries it once and decodes it faithfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEnvelope {
    pub node_id: i64,
    pub vat_id: i64,
    pub entity_id: i64,
    pub src_node_id: i64,
    pub src_vat_id: i64,
    pub src_entity_id: i64,
    pub function_name: String,
    pub promise_id: PromiseId,
    pub response: bool,
    pub values: Vec<ValueNode>,
}

impl From<Message> for WireEnvelope {
    fn from(m: Message) -> Self {
        WireEnvelope {
            node_id: m.dst.node_id,
            vat_id: m.dst.vat_id,
            entity_id: m.dst.entity_id,
            src_node_id: m.src.node_id,
            src_vat_id: m.src.vat_id,
            src_entity_id: m.src.entity_id,
            function_name: m.function_name,
            promise_id: m.promise_id,
            response: m.is_response,
            values: m.values,
        }
    }
}

impl From<WireEnvelope> for Message {
    fn from(e: WireEnvelope) -> Self {
        Message {
            dst: EntityAddress::new(e.node_id, e.vat_id, e.entity_id),
            src: EntityAddress::new(e.src_node_id, e.src_vat_id, e.src_entity_id),
            function_name: e.function_name,
            promise_id: e.promise_id,
            is_response: e.response,
            values: e.values,
        }
    }
}
