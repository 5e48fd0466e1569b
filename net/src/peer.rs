// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;

use futures::{SinkExt, StreamExt};
use log::{debug, warn};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;

use crate::transport::{Frame, FrameCodec};

pub type PeerId = u64;

/// What the reader task of a peer connection can report back to the
/// router: a decoded frame, or the connection going away (§4.4
/// "DISCONNECT"). The router is the only place allowed to mutate the
/// peer table (§4.4 "maintained only from the network thread"), so the
/// reader task never touches it directly — it only reports the event.
pub enum Inbound {
    Frame(Frame),
    Closed,
}

struct Peer {
    node_id: Option<i64>,
    outbound: flume::Sender<Frame>,
}

/// The node-to-connection address book (§4.4: "`peers` maps peer host-id
/// (transport-native) to a peer handle. `node_host_map` maps logical
/// `node_id` to peer host-id"). Owned only by the network loop — single
/// writer, per §4.4's "maintained only from the network thread".
#[derive(Default)]
pub struct PeerTable {
    peers: HashMap<PeerId, Peer>,
    node_host_map: HashMap<i64, PeerId>,
    next_id: PeerId,
}

impl PeerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Reserves a peer id ahead of spawning its reader/writer tasks —
    /// those tasks need the id to tag inbound frames, and the router
    /// needs the id to hand to [`spawn_peer`], so id allocation happens
    /// before the sender it will eventually be paired with exists.
    pub fn reserve(&mut self) -> PeerId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn install(&mut self, peer_id: PeerId, outbound: flume::Sender<Frame>) {
        self.peers.insert(peer_id, Peer {
            node_id: None,
            outbound,
        });
        pleroma_metrics::ACTIVE_PEERS.set(self.peers.len() as i64);
    }

    /// Binds a connection to the logical node id announced in its
    /// `Hello` frame. If the remote host was not already in the peer
    /// table under this node id, this establishes it (§4.4 step 1,
    /// "CONNECT").
    pub fn bind_node(&mut self, peer_id: PeerId, node_id: i64) {
        if let Some(peer) = self.peers.get_mut(&peer_id) {
            peer.node_id = Some(node_id);
        }
        self.node_host_map.insert(node_id, peer_id);
    }

    /// Clears per-peer state on disconnect (§4.4 step 1, "DISCONNECT").
    /// Messages subsequently addressed to this node id find no peer and
    /// are dropped (scenario 6) — there is no reconnection attempt here.
    pub fn remove(&mut self, peer_id: PeerId) {
        if let Some(peer) = self.peers.remove(&peer_id) {
            if let Some(node_id) = peer.node_id {
                self.node_host_map.remove(&node_id);
            }
        }
        pleroma_metrics::ACTIVE_PEERS.set(self.peers.len() as i64);
    }

    pub fn sender_for_node(&self, node_id: i64) -> Option<&flume::Sender<Frame>> {
        let peer_id = self.node_host_map.get(&node_id)?;
        self.peers.get(peer_id).map(|p| &p.outbound)
    }

    pub fn sender_for_peer(&self, peer_id: PeerId) -> Option<&flume::Sender<Frame>> {
        self.peers.get(&peer_id).map(|p| &p.outbound)
    }
}

/// Splits a freshly accepted or connected TCP stream into a reader task
/// (forwarding decoded frames into `inbound_tx`, tagged with `peer_id`)
/// and a writer task (draining `outbound_rx` onto the wire). Returns the
/// sender half the router keeps in the peer table.
///
/// Both tasks are spawned onto the same (single-threaded) runtime the
/// router itself runs on, so transport ownership stays on the one
/// network thread (§4.4, §5) even though the work is split across
/// cooperative tasks rather than one big poll loop.
pub fn spawn_peer(
    stream: TcpStream,
    peer_id: PeerId,
    inbound_tx: flume::Sender<(PeerId, Inbound)>,
) -> flume::Sender<Frame> {
    let framed = Framed::new(stream, FrameCodec::default());
    let (mut sink, mut stream) = framed.split();
    let (outbound_tx, outbound_rx) = flume::unbounded::<Frame>();

    tokio::spawn(async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(frame) => {
                    if inbound_tx.send_async((peer_id, Inbound::Frame(frame))).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("peer {peer_id}: read error: {e}");
                    break;
                }
            }
        }
        // Stream ended or errored: the connection is gone either way
        // (§4.4 "DISCONNECT"). Report it so the router clears this
        // peer's state; it is the only thread allowed to touch the
        // peer table.
        let _ = inbound_tx.send_async((peer_id, Inbound::Closed)).await;
        debug!("peer {peer_id}: reader task exiting");
    });

    tokio::spawn(async move {
        while let Ok(frame) = outbound_rx.recv_async().await {
            if let Err(e) = sink.send(frame).await {
                warn!("peer {peer_id}: write error: {e}");
                break;
            }
        }
        debug!("peer {peer_id}: writer task exiting");
    });

    outbound_tx
}
