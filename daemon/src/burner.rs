// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::error;

use pleroma_eval::Evaluator;
use pleroma_net::NetOutSender;
use pleroma_vat::{ParkedSender, ReadyReceiver};

/// Spawns the burner pool (§4.5 step 7, §5): each thread blocking-
/// dequeues a vat from the ready queue, runs one turn, and hands the vat
/// to the network thread via `net_vats` rather than re-enqueueing it
/// directly — the network thread is the sole authority that re-admits
/// vats to the ready queue (§4.3).
pub fn spawn_burners<E: Evaluator + 'static>(
    count: usize,
    evaluator: E,
    node_id: i64,
    ready_rx: ReadyReceiver<E>,
    net_vats_tx: ParkedSender<E>,
    net_out_tx: NetOutSender,
) -> Vec<JoinHandle<()>> {
    let evaluator = Arc::new(evaluator);
    (0..count.max(1))
        .map(|idx| {
            let evaluator = evaluator.clone();
            let ready_rx = ready_rx.clone();
            let net_vats_tx = net_vats_tx.clone();
            let net_out_tx = net_out_tx.clone();
            thread::Builder::new()
                .name(format!("pleroma-burner-{idx}"))
                .spawn(move || burner_loop(evaluator, node_id, ready_rx, net_vats_tx, net_out_tx))
                .expect("failed to spawn burner thread")
        })
        .collect()
}

fn burner_loop<E: Evaluator>(
    evaluator: Arc<E>,
    node_id: i64,
    ready_rx: ReadyReceiver<E>,
    net_vats_tx: ParkedSender<E>,
    net_out_tx: NetOutSender,
) {
    while let Ok(mut vat) = ready_rx.recv() {
        pleroma_metrics::READY_QUEUE_DEPTH.dec();
        match vat.turn(evaluator.as_ref(), node_id) {
            Ok(report) => {
                pleroma_metrics::TURNS_EXECUTED.inc();
                for m in report.net_out {
                    if net_out_tx.send(m).is_err() {
                        return;
                    }
                }
                if net_vats_tx.send(vat).is_err() {
                    return;
                }
            }
            Err(e) => {
                // §7: evaluator and routing faults are fatal to the
                // node — turns are not retried because a turn that
                // already flushed side effects is not idempotent.
                error!("fatal vat error on vat {}: {e}", vat.id);
                std::process::exit(1);
            }
        }
    }
}
