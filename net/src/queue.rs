// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_message::Message;

/// `net_out_queue` (§4.4, §5): MPSC, many burner threads producing the
/// messages a turn's flush phase could not deliver locally, the network
/// thread the sole consumer.
pub type NetOutSender = flume::Sender<Message>;
pub type NetOutReceiver = flume::Receiver<Message>;

pub fn net_out_queue() -> (NetOutSender, NetOutReceiver) {
    flume::unbounded()
}
