// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Transport faults (§7). A join-time connection failure is fatal; a
/// mid-run peer loss is not raised as an error at all — the peer is
/// simply dropped from the table and messages addressed to it are
/// discarded (scenario 6). This type covers the join-time and bind-time
/// cases only.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("failed to bind listen address {0}: {1}")]
    Bind(std::net::SocketAddr, #[source] std::io::Error),

    #[error("failed to connect to remote {0}: {1}")]
    Connect(std::net::SocketAddr, #[source] std::io::Error),

    #[error("envelope codec error: {0}")]
    Codec(#[from] pleroma_encoding::CodecError),
}
