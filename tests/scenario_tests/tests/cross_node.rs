// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Real TCP loopback between two routers: node 1 calls node 2's `Pong`
//! entity, gets `"pong"` back, and the promise it created is consumed
//! exactly once (§8 scenario 3). Further tests check that addressing a
//! node with no peer connection, or one that has since disconnected,
//! never panics the router — messages simply have nowhere to go and are
//! dropped (§8 scenario 6).

use std::net::SocketAddr;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use pleroma_entity::Entity;
use pleroma_eval::{EvalOutcome, StubEvaluator};
use pleroma_message::{Message, Promise};
use pleroma_net::{bind, net_out_queue, Router};
use pleroma_types::{EntityAddress, ValueNode};
use pleroma_vat::{parked_queue, ready_queue, Vat};

const NODE_A: i64 = 1;
const NODE_B: i64 = 2;

fn evaluator() -> StubEvaluator {
    StubEvaluator::new().register("Pong", "ping", |_, _, _| {
        Ok(EvalOutcome::Value(Some(ValueNode::String("pong".to_owned()))))
    })
}

#[tokio::test]
async fn cross_node_call_resolves_exactly_one_promise() {
    let ev = Arc::new(evaluator());

    // Node B: hosts the Pong entity, parked until addressed.
    let (b_ready_tx, b_ready_rx) = ready_queue::<StubEvaluator>();
    let (b_net_vats_tx, b_net_vats_rx) = parked_queue::<StubEvaluator>();
    let (b_net_out_tx, b_net_out_rx) = net_out_queue();
    let mut b_router: Router<StubEvaluator> =
        Router::new(NODE_B, b_ready_tx.clone(), b_net_out_rx, b_net_vats_rx);
    let mut pong_vat: Vat<StubEvaluator> = Vat::new(0);
    pong_vat.insert_entity(Entity::new(0, "Pong", ev.create_entity("Pong").unwrap()));
    b_router.park_initial(pong_vat);
    let b_listener = bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    let b_addr = b_listener.local_addr().unwrap();
    tokio::spawn(b_router.run(b_listener));

    tokio::spawn(run_burner(b_ready_rx, b_net_vats_tx, b_net_out_tx, ev.clone()));

    // Node A: hosts the caller, dials node B.
    let (a_ready_tx, a_ready_rx) = ready_queue::<StubEvaluator>();
    let (a_net_vats_tx, a_net_vats_rx) = parked_queue::<StubEvaluator>();
    let (a_net_out_tx, a_net_out_rx) = net_out_queue();
    let mut a_router: Router<StubEvaluator> =
        Router::new(NODE_A, a_ready_tx.clone(), a_net_out_rx, a_net_vats_rx);
    a_router.connect(b_addr).await.unwrap();
    let a_listener = bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    tokio::spawn(a_router.run(a_listener));

    tokio::spawn(run_burner(a_ready_rx, a_net_vats_tx, a_net_out_tx, ev.clone()));

    let caller_addr = EntityAddress::new(NODE_A, 0, 0);
    let callee_addr = EntityAddress::new(NODE_B, 0, 0);
    let mut caller_vat: Vat<StubEvaluator> = Vat::new(0);
    caller_vat.insert_entity(Entity::new(0, "Caller", ev.create_entity("Pong").unwrap()));

    let (done_tx, done_rx) = mpsc::channel::<Vec<ValueNode>>();
    caller_vat.promises.insert(
        7,
        Promise::for_callback(Box::new(move |results: &[ValueNode]| {
            let _ = done_tx.send(results.to_vec());
        })),
    );
    caller_vat.messages.push_back(Message {
        dst: callee_addr,
        src: caller_addr,
        function_name: "ping".to_owned(),
        promise_id: 7,
        is_response: false,
        values: vec![],
    });
    a_ready_tx.send(caller_vat).unwrap();

    let results =
        tokio::task::spawn_blocking(move || done_rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .expect("the ping/pong round trip should complete over the loopback connection");
    assert_eq!(results, vec![ValueNode::String("pong".to_owned())]);
}

async fn run_burner(
    ready_rx: flume::Receiver<Vat<StubEvaluator>>,
    net_vats_tx: flume::Sender<Vat<StubEvaluator>>,
    net_out_tx: flume::Sender<Message>,
    ev: Arc<StubEvaluator>,
) {
    loop {
        if let Ok(mut vat) = ready_rx.try_recv() {
            if let Ok(report) = vat.turn(ev.as_ref(), vat.id) {
                for m in report.net_out {
                    if net_out_tx.send(m).is_err() {
                        return;
                    }
                }
            }
            if net_vats_tx.send(vat).is_err() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn message_to_an_unconnected_node_is_silently_dropped() {
    let (ready_tx, _ready_rx) = ready_queue::<StubEvaluator>();
    let (net_vats_tx, net_vats_rx) = parked_queue::<StubEvaluator>();
    let (net_out_tx, net_out_rx) = net_out_queue();
    let router: Router<StubEvaluator> = Router::new(99, ready_tx, net_out_rx, net_vats_rx);
    let listener = bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    let handle = tokio::spawn(router.run(listener));

    net_out_tx
        .send(Message {
            dst: EntityAddress::new(12345, 0, 0),
            src: EntityAddress::new(99, 0, 0),
            function_name: "whatever".to_owned(),
            promise_id: -1,
            is_response: false,
            values: vec![],
        })
        .unwrap();
    drop(net_vats_tx);

    // No panic, no crash: give the router a couple of service cycles and
    // confirm it is still alive.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished());
    handle.abort();
}

#[tokio::test]
async fn peer_disconnect_mid_run_drops_subsequent_sends_without_crashing() {
    // Node B accepts a connection and is then dropped entirely — the
    // listener and its task go away, closing the socket out from under
    // node A (§4.4 "DISCONNECT", §8 scenario 6).
    let (b_ready_tx, _b_ready_rx) = ready_queue::<StubEvaluator>();
    let (_b_net_vats_tx, b_net_vats_rx) = parked_queue::<StubEvaluator>();
    let (_b_net_out_tx, b_net_out_rx) = net_out_queue();
    let b_router: Router<StubEvaluator> =
        Router::new(NODE_B, b_ready_tx, b_net_out_rx, b_net_vats_rx);
    let b_listener = bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    let b_addr = b_listener.local_addr().unwrap();
    let b_handle = tokio::spawn(b_router.run(b_listener));

    let (a_ready_tx, _a_ready_rx) = ready_queue::<StubEvaluator>();
    let (_a_net_vats_tx, a_net_vats_rx) = parked_queue::<StubEvaluator>();
    let (a_net_out_tx, a_net_out_rx) = net_out_queue();
    let mut a_router: Router<StubEvaluator> =
        Router::new(NODE_A, a_ready_tx, a_net_out_rx, a_net_vats_rx);
    a_router.connect(b_addr).await.unwrap();
    let a_listener = bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    tokio::spawn(a_router.run(a_listener));

    // Give the handshake a moment, then kill node B's side entirely.
    tokio::time::sleep(Duration::from_millis(100)).await;
    b_handle.abort();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Node A still thinks it has a peer for NODE_B until its reader task
    // notices the socket closed; either way, sending never panics and
    // the message is eventually just dropped.
    a_net_out_tx
        .send(Message {
            dst: EntityAddress::new(NODE_B, 0, 0),
            src: EntityAddress::new(NODE_A, 0, 0),
            function_name: "ping".to_owned(),
            promise_id: -1,
            is_response: false,
            values: vec![],
        })
        .unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    // Reaching here without a panic or a hung router is the assertion.
}
