// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The entity (actor) record, §3.
//!
//! An entity is identified by an `entity_id` within its vat and holds
//! opaque per-actor state owned by the evaluator (module scope + instance
//! fields). That state is generic here (`S`) because this crate has no
//! business knowing what the host interpreter keeps around for a given
//! entity instance — only that exactly one vat owns it for its entire
//! lifetime, and that it is never migrated or shared across vats.

/// An entity (actor) hosted by exactly one vat, for its entire lifetime.
#[derive(Debug)]
pub struct Entity<S> {
    pub id: i64,
    /// The name of the entity definition this instance was created from
    /// (e.g. `"Monad"`), used only for diagnostics and routing-fault
    /// messages.
    pub def_name: String,
    /// Opaque evaluator-owned state: module scope plus instance fields.
    pub state: S,
}

impl<S> Entity<S> {
    pub fn new(id: i64, def_name: impl Into<String>, state: S) -> Self {
        Entity {
            id,
            def_name: def_name.into(),
            state,
        }
    }
}
