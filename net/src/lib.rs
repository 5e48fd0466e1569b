// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod error;
mod listener;
mod peer;
mod queue;
mod router;
mod transport;

pub use error::NetError;
pub use listener::bind;
pub use peer::PeerId;
pub use queue::{net_out_queue, NetOutReceiver, NetOutSender};
pub use router::Router;
pub use transport::Frame;
