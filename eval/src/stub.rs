// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;
use std::path::Path;

use pleroma_entity::Entity;
use pleroma_types::ValueNode;

use crate::error::EvalError;
use crate::evaluator::{EvalOutcome, Evaluator};
use crate::module::{Module, ModuleLoader};
use crate::sink::{Continuation, SendSink};

/// Per-entity state for [`StubEvaluator`]: a bag of named fields, enough
/// for test functions to stash values across turns without needing a real
/// interpreter.
#[derive(Debug, Default, Clone)]
pub struct StubState {
    pub def_name: String,
    pub fields: HashMap<String, ValueNode>,
}

type Handler = Box<
    dyn Fn(&mut StubState, &mut dyn SendSink, &[ValueNode]) -> Result<EvalOutcome, EvalError>
        + Send
        + Sync,
>;

/// A minimal, registry-driven stand-in for the real interpreter (spec
/// §1's lexer/parser/evaluator is explicitly out of scope). Test code and
/// node bootstrap register the handful of functions a scenario needs
/// rather than this crate hardcoding any program logic.
#[derive(Default)]
pub struct StubEvaluator {
    handlers: HashMap<(String, String), Handler>,
    known_defs: HashMap<String, Vec<String>>,
}

impl StubEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` on entity definition `def`, and records `def`
    /// as known so [`Evaluator::create_entity`] accepts it.
    pub fn register<F>(mut self, def: &str, function: &str, handler: F) -> Self
    where
        F: Fn(&mut StubState, &mut dyn SendSink, &[ValueNode]) -> Result<EvalOutcome, EvalError>
            + Send
            + Sync
            + 'static,
    {
        self.known_defs
            .entry(def.to_string())
            .or_default()
            .push(function.to_string());
        self.handlers
            .insert((def.to_string(), function.to_string()), Box::new(handler));
        self
    }
}

impl Evaluator for StubEvaluator {
    type EntityState = StubState;

    fn create_entity(&self, def_name: &str) -> Result<StubState, EvalError> {
        if !self.known_defs.contains_key(def_name) {
            return Err(EvalError::UnknownEntityDef(def_name.to_string()));
        }
        Ok(StubState {
            def_name: def_name.to_string(),
            fields: HashMap::new(),
        })
    }

    fn eval_func_local(
        &self,
        ctx: &mut dyn SendSink,
        entity: &mut Entity<StubState>,
        function_name: &str,
        args: &[ValueNode],
    ) -> Result<EvalOutcome, EvalError> {
        let key = (entity.state.def_name.clone(), function_name.to_string());
        let handler = self.handlers.get(&key).ok_or_else(|| EvalError::UnknownFunction {
            def: entity.state.def_name.clone(),
            function: function_name.to_string(),
        })?;
        handler(&mut entity.state, ctx, args)
    }

    fn eval_promise_local(
        &self,
        ctx: &mut dyn SendSink,
        entity: &mut Entity<StubState>,
        continuation: Continuation,
        results: &[ValueNode],
    ) -> Result<(), EvalError> {
        let _ = (ctx, &entity.state);
        continuation(results);
        Ok(())
    }
}

/// A loader backed by an in-memory table of modules, for tests and for
/// bootstrap paths that embed their system modules rather than reading
/// them from disk.
#[derive(Default)]
pub struct StubModuleLoader {
    modules: HashMap<String, Module>,
}

impl StubModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.insert(module.name.clone(), module);
        self
    }
}

impl ModuleLoader for StubModuleLoader {
    fn load_system_module(&self, name: &str) -> Result<Module, EvalError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::ModuleLoad(format!("no such system module {name:?}")))
    }

    fn load_file(&self, path: &Path) -> Result<Module, EvalError> {
        Err(EvalError::ModuleLoad(format!(
            "StubModuleLoader cannot load files from disk: {}",
            path.display()
        )))
    }
}
