// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Address and value types shared by every layer of the runtime: the vat
//! scheduler, the evaluator adapter, the wire codec and the network
//! router all build on these.

mod address;
mod value;

pub use address::{EntityAddress, PromiseId, NO_REPLY, SENTINEL};
pub use value::ValueNode;
