// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod context;
mod error;
mod id;
mod queue;
mod vat;

pub use context::TurnContext;
pub use error::VatError;
pub use id::VatIdAllocator;
pub use queue::{
    parked_queue, ready_queue, ParkedReceiver, ParkedSender, ReadyReceiver, ReadySender,
};
pub use vat::{TurnReport, Vat};
