// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Same-node delivery, two ways: two vats exchanging a call and its
//! reply only through the router's local-delivery path (`net_out_queue`
//! → grouped by vat id → re-admitted to the ready queue), and a single
//! vat exercising the same-vat fast path a turn uses for self-sends,
//! where the router must re-admit the vat on its own mailbox state
//! rather than on a `pending` group.

use std::net::SocketAddr;
use std::sync::mpsc;
use std::time::Duration;

use pleroma_entity::Entity;
use pleroma_eval::{EvalOutcome, StubEvaluator};
use pleroma_message::{Message, Promise};
use pleroma_net::{bind, net_out_queue, Router};
use pleroma_types::{EntityAddress, ValueNode};
use pleroma_vat::{parked_queue, ready_queue, Vat};

const NODE: i64 = 0;

fn evaluator() -> StubEvaluator {
    StubEvaluator::new().register("Doubler", "double", |_, _, args| {
        let n = args[0].as_number().unwrap();
        Ok(EvalOutcome::Value(Some(ValueNode::Number(n * 2.0))))
    })
}

#[tokio::test]
async fn local_call_is_routed_and_its_reply_resolves_the_caller_promise() {
    let ev = evaluator();

    let (ready_tx, ready_rx) = ready_queue::<StubEvaluator>();
    let (net_vats_tx, net_vats_rx) = parked_queue::<StubEvaluator>();
    let (net_out_tx, net_out_rx) = net_out_queue();

    let mut router: Router<StubEvaluator> =
        Router::new(NODE, ready_tx.clone(), net_out_rx, net_vats_rx);

    let caller_addr = EntityAddress::new(NODE, 0, 0);
    let mut caller_vat: Vat<StubEvaluator> = Vat::new(0);
    caller_vat.insert_entity(Entity::new(0, "Caller", ev.create_entity("Doubler").unwrap()));

    let callee_addr = EntityAddress::new(NODE, 1, 0);
    let mut callee_vat: Vat<StubEvaluator> = Vat::new(1);
    callee_vat.insert_entity(Entity::new(0, "Doubler", ev.create_entity("Doubler").unwrap()));
    router.park_initial(callee_vat);

    let (done_tx, done_rx) = mpsc::channel::<Vec<ValueNode>>();
    caller_vat.promises.insert(
        1,
        Promise::for_callback(Box::new(move |results: &[ValueNode]| {
            let _ = done_tx.send(results.to_vec());
        })),
    );
    caller_vat.messages.push_back(Message {
        dst: callee_addr,
        src: caller_addr,
        function_name: "double".to_owned(),
        promise_id: 1,
        is_response: false,
        values: vec![ValueNode::Number(21.0)],
    });
    ready_tx.send(caller_vat).unwrap();

    let listener = bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    tokio::spawn(router.run(listener));

    let ev_for_burner = ev;
    tokio::spawn(async move {
        loop {
            if let Ok(mut vat) = ready_rx.try_recv() {
                let report = vat.turn(&ev_for_burner, NODE).unwrap();
                for m in report.net_out {
                    if net_out_tx.send(m).is_err() {
                        return;
                    }
                }
                if net_vats_tx.send(vat).is_err() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    });

    // The router's outbound/inbound service budget is bounded at ~1s
    // (§4.4); give one full cycle of slack for the call to go out and
    // the reply to come back.
    let results = tokio::task::spawn_blocking(move || done_rx.recv_timeout(Duration::from_secs(3)))
        .await
        .unwrap()
        .expect("caller's promise should resolve once the reply is routed back");

    assert_eq!(results, vec![ValueNode::Number(42.0)]);
}

/// §8 scenario 2: entity A calls `B.foo(7)` where B lives in the *same*
/// vat. The outbound reply never leaves the vat — it is re-pushed onto
/// `messages` by the same-vat fast path during flush (§4.1, §9(ii)), so
/// the router never sees it in `pending`. The router must still
/// re-admit the parked vat on the strength of its own non-empty mailbox
/// (`Vat::has_pending_work`), or this hangs forever.
#[tokio::test]
async fn same_vat_self_send_is_redelivered_and_resolves_the_caller_promise() {
    let ev = evaluator();

    let (ready_tx, ready_rx) = ready_queue::<StubEvaluator>();
    let (net_vats_tx, net_vats_rx) = parked_queue::<StubEvaluator>();
    let (net_out_tx, net_out_rx) = net_out_queue();

    let router: Router<StubEvaluator> = Router::new(NODE, ready_tx.clone(), net_out_rx, net_vats_rx);

    let caller_addr = EntityAddress::new(NODE, 0, 0);
    let callee_addr = EntityAddress::new(NODE, 0, 1);
    let mut vat: Vat<StubEvaluator> = Vat::new(0);
    vat.insert_entity(Entity::new(0, "Caller", ev.create_entity("Doubler").unwrap()));
    vat.insert_entity(Entity::new(1, "Doubler", ev.create_entity("Doubler").unwrap()));

    let (done_tx, done_rx) = mpsc::channel::<Vec<ValueNode>>();
    vat.promises.insert(
        1,
        Promise::for_callback(Box::new(move |results: &[ValueNode]| {
            let _ = done_tx.send(results.to_vec());
        })),
    );
    vat.messages.push_back(Message {
        dst: callee_addr,
        src: caller_addr,
        function_name: "double".to_owned(),
        promise_id: 1,
        is_response: false,
        values: vec![ValueNode::Number(7.0)],
    });
    ready_tx.send(vat).unwrap();

    let listener = bind("127.0.0.1:0".parse::<SocketAddr>().unwrap())
        .await
        .unwrap();
    tokio::spawn(router.run(listener));

    let ev_for_burner = ev;
    tokio::spawn(async move {
        loop {
            if let Ok(mut vat) = ready_rx.try_recv() {
                let report = vat.turn(&ev_for_burner, NODE).unwrap();
                for m in report.net_out {
                    if net_out_tx.send(m).is_err() {
                        return;
                    }
                }
                if net_vats_tx.send(vat).is_err() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    });

    // The first turn dispatches the call and re-pushes its reply onto
    // the vat's own mailbox without ever touching `net_out_queue`; a
    // second turn, driven only by the router's re-admission, dispatches
    // that reply and resolves the promise.
    let results = tokio::task::spawn_blocking(move || done_rx.recv_timeout(Duration::from_secs(3)))
        .await
        .unwrap()
        .expect("self-delivered reply should be redispatched and resolve the promise");

    assert_eq!(results, vec![ValueNode::Number(14.0)]);
}
