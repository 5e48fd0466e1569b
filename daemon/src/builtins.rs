// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use pleroma_eval::{EvalOutcome, Module, StubEvaluator, StubModuleLoader};

/// The lexer/parser/typechecker/AST evaluator behind the `Evaluator` and
/// `ModuleLoader` traits are out-of-scope external collaborators (the
/// surface language is not part of this runtime). What is wired in here
/// is the minimum system behavior needed to actually bring a node up and
/// keep it running end to end: the `Monad` bootstrap entity acknowledges
/// `main` and does nothing else, and `NodeMan` acknowledges pings.
/// Swapping in a real interpreter means providing a different
/// `Evaluator`/`ModuleLoader` pair — the rest of the node does not change.
pub fn system_evaluator() -> StubEvaluator {
    StubEvaluator::new()
        .register("Monad", "main", |_, _, _| Ok(EvalOutcome::Value(None)))
        .register("NodeMan", "ping", |_, _, _| {
            Ok(EvalOutcome::Value(Some(pleroma_types::ValueNode::String(
                "pong".to_owned(),
            ))))
        })
}

pub fn system_module_loader() -> StubModuleLoader {
    StubModuleLoader::new().with_module(Module {
        name: "pleroma.kernel".to_owned(),
        entity_defs: vec!["Monad".to_owned(), "NodeMan".to_owned()],
    })
}
