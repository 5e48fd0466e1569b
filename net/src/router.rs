// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use log::{info, warn};
use tokio::net::{TcpListener, TcpStream};

use pleroma_eval::Evaluator;
use pleroma_message::Message;
use pleroma_vat::{ParkedReceiver, ReadySender, Vat};

use crate::error::NetError;
use crate::peer::{spawn_peer, Inbound, PeerId, PeerTable};
use crate::transport::Frame;

const SERVICE_BUDGET: Duration = Duration::from_millis(1000);
const MAX_OUTBOUND_PER_ITERATION: usize = 100;
const MAX_PARKED_PER_ITERATION: usize = 100;

/// The router/network loop (§4.4): one dedicated thread owning the
/// transport, the peer table, the inbound queue and `net_vats`.
pub struct Router<E: Evaluator> {
    local_node_id: i64,
    peers: PeerTable,
    ready_tx: ReadySender<E>,
    net_out_rx: flume::Receiver<Message>,
    net_vats_rx: ParkedReceiver<E>,
    inbound_tx: flume::Sender<(PeerId, Inbound)>,
    inbound_rx: flume::Receiver<(PeerId, Inbound)>,
    /// Inbound messages not yet delivered, grouped by destination vat id
    /// (§4.4 step 3: "group `net_in_queue` by destination vat_id").
    /// Populated both from decoded network frames and from same-node
    /// cross-vat sends, which never touch the wire.
    pending: HashMap<i64, Vec<Message>>,
    /// Vats parked by a burner after a turn, waiting to either receive
    /// newly grouped inbound messages and be re-admitted to the ready
    /// queue, or sit idle until some do arrive.
    idle_vats: HashMap<i64, Vat<E>>,
}

impl<E: Evaluator> Router<E> {
    pub fn new(
        local_node_id: i64,
        ready_tx: ReadySender<E>,
        net_out_rx: flume::Receiver<Message>,
        net_vats_rx: ParkedReceiver<E>,
    ) -> Self {
        let (inbound_tx, inbound_rx) = flume::unbounded();
        Router {
            local_node_id,
            peers: PeerTable::new(),
            ready_tx,
            net_out_rx,
            net_vats_rx,
            inbound_tx,
            inbound_rx,
            pending: HashMap::new(),
            idle_vats: HashMap::new(),
        }
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Seeds a freshly created vat with no mailbox contents yet (e.g.
    /// `NodeMan`, §4.5 step 5) into the idle table before the loop
    /// starts, so it is ready to receive once something addresses it
    /// without ever having passed through the ready queue with an empty
    /// mailbox (§8: "a vat enqueued on the ready queue has at least one
    /// message in its mailbox").
    pub fn park_initial(&mut self, vat: Vat<E>) {
        self.idle_vats.insert(vat.id, vat);
    }

    /// Connects out to a remote node to join an existing cluster (§4.5
    /// step 6). A failure here is a join-time transport fault — fatal.
    pub async fn connect(&mut self, addr: SocketAddr) -> Result<(), NetError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| NetError::Connect(addr, e))?;
        self.accept_stream(stream);
        Ok(())
    }

    fn accept_stream(&mut self, stream: TcpStream) {
        let peer_id = self.peers.reserve();
        let outbound = spawn_peer(stream, peer_id, self.inbound_tx.clone());
        let hello = Frame::Hello {
            node_id: self.local_node_id,
        };
        let _ = outbound.send(hello);
        self.peers.install(peer_id, outbound);
    }

    /// Runs the network loop forever (§4.4, §4.5 step 8). Each iteration
    /// services the transport for a bounded time budget, then drains
    /// outbound and delivers inbound in bounded batches, so none of the
    /// three duties can starve the others.
    pub async fn run(mut self, listener: TcpListener) -> Result<(), NetError> {
        info!("network loop started on node {}", self.local_node_id);
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, addr)) => {
                            info!("accepted connection from {addr}");
                            self.accept_stream(stream);
                        }
                        Err(e) => warn!("accept failed: {e}"),
                    }
                }
                inbound = self.inbound_rx.recv_async() => {
                    if let Ok((peer_id, event)) = inbound {
                        self.handle_inbound(peer_id, event);
                    }
                }
                _ = tokio::time::sleep(SERVICE_BUDGET) => {}
            }

            self.drain_outbound();
            self.deliver_to_vats();
        }
    }

    fn handle_inbound(&mut self, peer_id: PeerId, event: Inbound) {
        match event {
            Inbound::Frame(Frame::Hello { node_id }) => {
                info!("peer {peer_id} identified as node {node_id}");
                self.peers.bind_node(peer_id, node_id);
            }
            Inbound::Frame(Frame::Msg(bytes)) => match pleroma_encoding::decode(&bytes) {
                Ok(m) => self.pending.entry(m.dst.vat_id).or_default().push(m),
                Err(e) => warn!("peer {peer_id}: dropping undecodable envelope: {e}"),
            },
            Inbound::Closed => {
                // §4.4 DISCONNECT: clear per-peer state. Messages still
                // in flight to this node id simply find no sender on
                // the next `drain_outbound` pass and are dropped (§8
                // scenario 6) — there is no reconnect or dead-letter
                // queue in the core.
                warn!("peer {peer_id} disconnected");
                self.peers.remove(peer_id);
            }
        }
    }

    fn drain_outbound(&mut self) {
        for _ in 0..MAX_OUTBOUND_PER_ITERATION {
            let m = match self.net_out_rx.try_recv() {
                Ok(m) => m,
                Err(_) => break,
            };
            pleroma_metrics::MESSAGES_ROUTED.inc();
            if m.dst.node_id == self.local_node_id {
                self.pending.entry(m.dst.vat_id).or_default().push(m);
                continue;
            }
            let Some(sender) = self.peers.sender_for_node(m.dst.node_id) else {
                warn!(
                    "no peer for node {}: dropping message to {:?}",
                    m.dst.node_id, m.dst
                );
                continue;
            };
            let bytes = match pleroma_encoding::encode(&m) {
                Ok(b) => b,
                Err(e) => {
                    warn!("failed to encode outbound message: {e}");
                    continue;
                }
            };
            if sender.send(Frame::Msg(bytes)).is_err() {
                warn!("peer for node {} gone; dropping message", m.dst.node_id);
            }
        }
    }

    fn deliver_to_vats(&mut self) {
        for _ in 0..MAX_PARKED_PER_ITERATION {
            let vat = match self.net_vats_rx.try_recv() {
                Ok(v) => v,
                Err(_) => break,
            };
            self.idle_vats.insert(vat.id, vat);
        }

        // A parked vat is re-admitted either because fresh cross-vat/
        // network inbound was grouped for it above, or because it was
        // parked with messages already sitting in its own mailbox — the
        // same-vat fast path (§4.1, §9(ii)) re-pushes a self-addressed
        // send onto `messages` during flush, which never touches
        // `pending` since it never left the vat. Without the latter
        // check such a vat would sit in `idle_vats` forever.
        let ready_ids: Vec<i64> = self
            .idle_vats
            .iter()
            .filter(|(id, vat)| self.pending.contains_key(*id) || vat.has_pending_work())
            .map(|(id, _)| *id)
            .collect();

        for vat_id in ready_ids {
            let mut vat = self.idle_vats.remove(&vat_id).expect("just checked");
            if let Some(messages) = self.pending.remove(&vat_id) {
                vat.messages.extend(messages);
            }
            if self.ready_tx.send(vat).is_err() {
                warn!("ready queue closed; dropping vat {vat_id}");
            } else {
                pleroma_metrics::READY_QUEUE_DEPTH.inc();
            }
        }
    }
}
