// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::net::SocketAddr;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use log::info;

use pleroma_config::{NodeConfig, StartOpt};
use pleroma_entity::Entity;
use pleroma_eval::{Evaluator, ModuleLoader, StubEvaluator};
use pleroma_message::Message;
use pleroma_net::{net_out_queue, Router};
use pleroma_types::EntityAddress;
use pleroma_vat::{parked_queue, ready_queue, Vat, VatIdAllocator};

use crate::burner::spawn_burners;

/// The process-wide Monad address, published once at inoculation (§4.5
/// step 3, §9: replacing the prototype's `monad_ref` global with a
/// single atomically-publishable cell).
static MONAD_REF: OnceLock<EntityAddress> = OnceLock::new();

pub fn monad_ref() -> Option<EntityAddress> {
    MONAD_REF.get().copied()
}

const LOCAL_NODE_ID: i64 = 0;

/// Runs the full bootstrap sequence (§4.5) and then the network loop,
/// which never returns under ordinary operation.
pub async fn run(opt: StartOpt) -> Result<()> {
    // 1. Read node config — a config fault here is fatal before
    //    bootstrap completes (§7).
    let config = NodeConfig::read(&opt.config)
        .with_context(|| format!("reading node config from {:?}", opt.config))?;
    info!("node {:?} starting, resources={:?}", config.name, config.resources);

    // 2. Load the kernel module and the system Monad module. If `--program`
    //    names a user program file, it supplies the bootstrap entity
    //    definition instead of the compiled-in kernel (original
    //    prototype's `load_file` + `inoculate_pleroma(program, user_program)`
    //    sequence); parsing that file is the evaluator's job, out of scope
    //    for the core (§1), so `StubModuleLoader::load_file` simply reports
    //    that it cannot do so until a real front end is wired in.
    let loader = crate::builtins::system_module_loader();
    let kernel = loader
        .load_system_module("pleroma.kernel")
        .context("loading kernel module")?;
    let boot_module = match &opt.program {
        Some(path) => loader
            .load_file(path)
            .with_context(|| format!("loading program file {}", path.display()))?,
        None => kernel,
    };
    if !boot_module.has_entity_def(&opt.entity) {
        anyhow::bail!(
            "bootstrap entity {:?} not found in {}",
            opt.entity,
            opt.program
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "kernel module".to_owned())
        );
    }

    let evaluator = crate::builtins::system_evaluator();

    let (ready_tx, ready_rx) = ready_queue::<StubEvaluator>();
    let (net_vats_tx, net_vats_rx) = parked_queue::<StubEvaluator>();
    let (net_out_tx, net_out_rx) = net_out_queue();

    let mut router: Router<StubEvaluator> =
        Router::new(LOCAL_NODE_ID, ready_tx.clone(), net_out_rx, net_vats_rx);

    // §3: "Node — owns vat_id_base (monotonic allocator)". Every vat
    // bootstrap creates draws its id from here rather than a literal
    // constant, so a third bootstrap-created vat would just be the next
    // `alloc()` call.
    let mut vat_ids = VatIdAllocator::new();

    // 3. Inoculate if no remote host was given: create vat 0, create the
    //    Monad entity at (self, 0, 0), publish monad_ref, inject `hello`.
    if opt.remote_host.is_none() {
        let vat0_id = vat_ids.alloc();
        let monad_addr = EntityAddress::new(LOCAL_NODE_ID, vat0_id, 0);
        let mut vat0: Vat<StubEvaluator> = Vat::new(vat0_id);
        let state = evaluator
            .create_entity(&opt.entity)
            .with_context(|| format!("creating bootstrap entity {:?}", opt.entity))?;
        vat0.insert_entity(Entity::new(0, opt.entity.clone(), state));
        vat0.messages.push_back(Message::boot_hello(monad_addr));

        MONAD_REF
            .set(monad_addr)
            .expect("inoculation runs at most once per process");
        info!("inoculated: monad at {monad_addr}");

        ready_tx
            .send(vat0)
            .map_err(|_| anyhow::anyhow!("ready queue closed during bootstrap"))?;
        pleroma_metrics::READY_QUEUE_DEPTH.inc();
    }

    // 4. Start the transport and bind the local listen address.
    let listen_addr: SocketAddr = format!("{}:{}", opt.local_host, opt.local_port)
        .parse()
        .context("parsing local listen address")?;
    let listener = pleroma_net::bind(listen_addr).await?;
    info!("listening on {listen_addr}");

    // 5. Create the NodeMan entity in a new vat, parked until addressed.
    let node_man_vat_id = vat_ids.alloc();
    let node_man_addr = EntityAddress::new(LOCAL_NODE_ID, node_man_vat_id, 0);
    let mut node_man_vat: Vat<StubEvaluator> = Vat::new(node_man_vat_id);
    let node_man_state = evaluator
        .create_entity("NodeMan")
        .context("creating NodeMan entity")?;
    node_man_vat.insert_entity(Entity::new(0, "NodeMan", node_man_state));
    router.park_initial(node_man_vat);
    info!("NodeMan at {node_man_addr}");

    // 6. If a remote host was specified, connect to it.
    if let Some(remote_host) = &opt.remote_host {
        let remote_addr: SocketAddr = format!("{remote_host}:{}", opt.remote_port)
            .parse()
            .context("parsing remote address")?;
        router.connect(remote_addr).await?;
        info!("connected to remote {remote_addr}");
    }

    // 7. Start the burner pool (§4.5 step 7, §5: "N >= 1, configurable").
    let burner_count = opt.burners.unwrap_or_else(num_cpus::get).max(1);
    let _burners = spawn_burners(
        burner_count,
        evaluator,
        LOCAL_NODE_ID,
        ready_rx,
        net_vats_tx,
        net_out_tx,
    );
    info!("started {burner_count} burner thread(s)");

    // Ambient observability (SPEC_FULL §10): serve the Prometheus
    // registry over HTTP. Not part of the core routing path, so its
    // failure is logged rather than fatal to the node.
    let metrics_addr: SocketAddr = format!("{}:{}", opt.metrics_host, opt.metrics_port)
        .parse()
        .context("parsing metrics listen address")?;
    let registry = pleroma_metrics::default_registry();
    tokio::spawn(async move {
        if let Err(e) = pleroma_metrics::run(metrics_addr, registry).await {
            log::error!("metrics endpoint exited: {e}");
        }
    });

    // 8. Enter the network loop on the bootstrap thread.
    router.run(listener).await.context("network loop exited")?;
    Ok(())
}
