// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod error;
mod evaluator;
mod module;
mod sink;
mod stub;

pub use error::EvalError;
pub use evaluator::{EvalOutcome, Evaluator};
pub use module::{Module, ModuleLoader};
pub use sink::{Continuation, SendSink};
pub use stub::{StubEvaluator, StubModuleLoader, StubState};
