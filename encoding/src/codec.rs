// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

use pleroma_message::Message;

use crate::envelope::WireEnvelope;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode envelope: {0}")]
    Encode(#[source] serde_cbor::Error),
    #[error("failed to decode envelope: {0}")]
    Decode(#[source] serde_cbor::Error),
}

/// Serializes a message to the bytes placed inside one length-delimited
/// transport frame (§4.4 — "framing is provided by the reliable-packet
/// transport; no length prefix inside").
pub fn encode(m: &Message) -> Result<Vec<u8>, CodecError> {
    let envelope = WireEnvelope::from(m.clone());
    serde_cbor::to_vec(&envelope).map_err(CodecError::Encode)
}

/// Inverse of [`encode`].
pub fn decode(bytes: &[u8]) -> Result<Message, CodecError> {
    let envelope: WireEnvelope = serde_cbor::from_slice(bytes).map_err(CodecError::Decode)?;
    Ok(envelope.into())
}
