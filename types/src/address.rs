// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use serde::{Deserialize, Serialize};

/// A vat-wide unique identifier for an entity, also used as the identifier
/// of the asynchronous reply expected for a call. `NO_REPLY` marks a
/// fire-and-forget send that never creates a promise.
pub type PromiseId = i64;

/// Sentinel meaning "no reply expected" for an outbound call, and the
/// marker used on system-injected messages that have no originating
/// entity.
pub const NO_REPLY: PromiseId = -1;

/// Sentinel used for the source of a system-injected message (e.g. the
/// `hello` message that inoculates the Monad entity). Such messages are
/// not a reply target: `Address::is_sentinel` recognizes this value.
pub const SENTINEL: i64 = -1;

/// The address of an entity within the cluster: `(node_id, vat_id,
/// entity_id)`. Totally ordered, hashable, and `Copy` — addresses are
/// small values, never heap-allocated handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityAddress {
    pub node_id: i64,
    pub vat_id: i64,
    pub entity_id: i64,
}

impl EntityAddress {
    pub const fn new(node_id: i64, vat_id: i64, entity_id: i64) -> Self {
        Self {
            node_id,
            vat_id,
            entity_id,
        }
    }

    /// The address used as the source of system-injected messages, e.g.
    /// the boot `hello` call delivered to the Monad entity. Has no real
    /// reply path: any reply addressed here is dropped (§4.1 scenario 1).
    pub const fn sentinel() -> Self {
        Self::new(SENTINEL, SENTINEL, SENTINEL)
    }

    pub const fn is_sentinel(&self) -> bool {
        self.node_id == SENTINEL
    }

    /// Whether this address names a vat on `local_node`.
    pub const fn is_local_to(&self, local_node: i64) -> bool {
        self.node_id == local_node
    }
}

impl fmt::Display for EntityAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.node_id, self.vat_id, self.entity_id)
    }
}
