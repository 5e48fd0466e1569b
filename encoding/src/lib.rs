// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod codec;
mod envelope;

pub use codec::{decode, encode, CodecError};
pub use envelope::WireEnvelope;
