// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Message envelopes, the per-vat promise table, and reply synthesis
//! (spec §3, §4.2).

mod message;
mod promise;
mod reply;

pub use message::Message;
pub use promise::Promise;
pub use reply::synthesize_reply;
