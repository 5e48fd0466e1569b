// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref TURNS_EXECUTED: IntCounter = IntCounter::new(
        "pleroma_turns_executed_total",
        "Number of vat turns run by any burner thread"
    )
    .expect("metric can be created");
    pub static ref MESSAGES_ROUTED: IntCounter = IntCounter::new(
        "pleroma_messages_routed_total",
        "Number of messages the network thread has routed, local or remote"
    )
    .expect("metric can be created");
    pub static ref ACTIVE_PEERS: IntGauge = IntGauge::new(
        "pleroma_active_peers",
        "Number of peers currently present in the peer table"
    )
    .expect("metric can be created");
    pub static ref READY_QUEUE_DEPTH: IntGauge = IntGauge::new(
        "pleroma_ready_queue_depth",
        "Approximate number of vats waiting on the ready queue"
    )
    .expect("metric can be created");
}

/// Builds a fresh registry with all process metrics registered. Called
/// once at node bootstrap; the returned registry is what the exposition
/// endpoint serves.
pub fn default_registry() -> Registry {
    let registry = Registry::new();
    registry
        .register(Box::new(TURNS_EXECUTED.clone()))
        .expect("collector not already registered");
    registry
        .register(Box::new(MESSAGES_ROUTED.clone()))
        .expect("collector not already registered");
    registry
        .register(Box::new(ACTIVE_PEERS.clone()))
        .expect("collector not already registered");
    registry
        .register(Box::new(READY_QUEUE_DEPTH.clone()))
        .expect("collector not already registered");
    registry
}
