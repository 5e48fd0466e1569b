// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_types::ValueNode;

use crate::message::Message;

/// Synthesizes the reply to an incoming call `m_in` given its return
/// value, per §4.2. Source/destination are swapped, the promise id is
/// carried over verbatim, and only a recognized value travels in the
/// reply — anything else (the evaluator returning a higher-order value)
/// yields an empty `values`, which is deliberate: the typechecker is
/// expected to reject such returns upstream, not this layer.
pub fn synthesize_reply(m_in: &Message, return_value: Option<ValueNode>) -> Message {
    Message {
        dst: m_in.src,
        src: m_in.dst,
        function_name: m_in.function_name.clone(),
        promise_id: m_in.promise_id,
        is_response: true,
        values: return_value.into_iter().collect(),
    }
}
