// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use pleroma_types::{EntityAddress, PromiseId, ValueNode, NO_REPLY};

/// An immutable message envelope. Once a `Message` has been pushed onto a
/// vat's `out_messages` for send it is never mutated again — it is either
/// delivered to a local mailbox or handed to the network thread by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub dst: EntityAddress,
    pub src: EntityAddress,
    pub function_name: String,
    pub promise_id: PromiseId,
    pub is_response: bool,
    pub values: Vec<ValueNode>,
}

impl Message {
    /// Builds the synthetic `hello` message that inoculates the Monad
    /// entity at node bootstrap (§4.5, §8 scenario 1). Its source is the
    /// sentinel address, so any reply synthesized for it is dropped.
    pub fn boot_hello(monad: EntityAddress) -> Self {
        Message {
            dst: monad,
            src: EntityAddress::sentinel(),
            function_name: "main".to_owned(),
            promise_id: NO_REPLY,
            is_response: false,
            values: vec![ValueNode::Number(0.0)],
        }
    }

    /// A call never expects `main` to be invoked by anything but the
    /// bootstrap injection (§4.1 special case).
    pub fn is_main(&self) -> bool {
        self.function_name == "main"
    }
}
