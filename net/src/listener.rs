// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::error::NetError;

/// Binds the local listen address (§4.5 step 4).
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, NetError> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| NetError::Bind(addr, e))
}
