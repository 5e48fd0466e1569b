// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod registry;
mod server;

pub use prometheus::Registry;
pub use registry::{default_registry, ACTIVE_PEERS, MESSAGES_ROUTED, READY_QUEUE_DEPTH, TURNS_EXECUTED};
pub use server::run;
