// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::convert::Infallible;
use std::net::SocketAddr;

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use log::info;
use prometheus::{Encoder, Registry, TextEncoder};

async fn serve_metrics(
    registry: Registry,
    _req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut buf) {
        log::error!("failed to encode metrics: {e}");
        return Ok(Response::builder().status(500).body(Body::empty()).unwrap());
    }
    Ok(Response::new(Body::from(buf)))
}

/// Serves `GET /metrics` in Prometheus text exposition format until the
/// process exits. Ambient observability surface, not part of the core
/// runtime's message-routing responsibilities.
pub async fn run(addr: SocketAddr, registry: Registry) -> Result<(), hyper::Error> {
    let make_svc = make_service_fn(move |_conn| {
        let registry = registry.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| serve_metrics(registry.clone(), req)))
        }
    });

    info!("metrics endpoint listening on http://{addr}/metrics");
    Server::bind(&addr).serve(make_svc).await
}
