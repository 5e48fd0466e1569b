// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};
use tokio_util::codec::{Decoder, Encoder, LengthDelimitedCodec};

/// Everything that travels over one TCP connection between two nodes.
/// `Hello` is the handshake (§4.5: "a plain CONNECT event"; we need one
/// real frame to carry the peer's logical node id, since TCP alone only
/// gives us a socket address). `Msg` carries an already wire-encoded
/// envelope (§4.4) produced by `pleroma_encoding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Frame {
    Hello { node_id: i64 },
    Msg(Vec<u8>),
}

/// Frames a [`Frame`] inside a length-delimited record (§4.4: "framing is
/// provided by the reliable-packet transport; no length prefix inside" —
/// here the reliable transport is TCP + this length prefix, replacing
/// the original ENet packet boundary).
#[derive(Default)]
pub struct FrameCodec {
    inner: LengthDelimitedCodec,
}

impl Encoder<Frame> for FrameCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = serde_cbor::to_vec(&item)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut framed = BytesMut::with_capacity(payload.len());
        framed.put_slice(&payload);
        self.inner.encode(framed.freeze(), dst)
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(mut bytes) = self.inner.decode(src)? else {
            return Ok(None);
        };
        let payload = bytes.copy_to_bytes(bytes.remaining());
        let frame = serde_cbor::from_slice(&payload)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Some(frame))
    }
}
