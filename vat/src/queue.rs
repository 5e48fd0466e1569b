// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_eval::Evaluator;

use crate::vat::Vat;

/// The blocking multi-producer/multi-consumer queue of runnable vats
/// (§4.3). Producers: the network thread (after delivering inbound
/// messages), node bootstrap, and — indirectly, via the network thread —
/// the vat turn loop re-admitting itself after flush. Consumers: burner
/// threads, via a blocking dequeue.
///
/// A vat is sent here only after the network thread places at least one
/// new message in its mailbox and the vat is not currently owned by a
/// burner; this crate only supplies the channel shape, the admission
/// invariant is upheld by whoever holds the sending half (the network
/// thread, in `pleroma_net`).
pub type ReadySender<E> = flume::Sender<Vat<E>>;
pub type ReadyReceiver<E> = flume::Receiver<Vat<E>>;

pub fn ready_queue<E: Evaluator>() -> (ReadySender<E>, ReadyReceiver<E>) {
    flume::unbounded()
}

/// `net_vats`: vats parked by a burner immediately after it finishes a
/// turn, handed to the network thread rather than straight back onto the
/// ready queue (§4.3, §5) — MPSC, many burners producing, the network
/// thread the sole consumer.
pub type ParkedSender<E> = flume::Sender<Vat<E>>;
pub type ParkedReceiver<E> = flume::Receiver<Vat<E>>;

pub fn parked_queue<E: Evaluator>() -> (ParkedSender<E>, ParkedReceiver<E>) {
    flume::unbounded()
}
