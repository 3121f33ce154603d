//! Method resolution: candidate generation over the fallback tiers.
//!
//! Given a token and a built [`DispatchTable`], [`resolve`] produces the
//! ordered, deduplicated candidate sequence for one dispatch call. The tier
//! order is fixed, most specific first:
//!
//! 1. **Ancestry**: every name in the token's ancestry chain, nearest
//!    ancestor first.
//! 2. **Builtin name**: the token's builtin alias, if it has one.
//! 3. **Structural categories**: each entry of [`Structural::ALL`] the
//!    token satisfies, in declaration order.
//! 4. **Capability categories**: each entry of [`Capability::ALL`] the
//!    token satisfies, in declaration order.
//!
//! Category-tier candidates are tried under two names, the category's own
//! name and the token's backing type name for that category, so handlers
//! can be keyed by the abstract interface or by the concrete type.
//!
//! Candidates are deduplicated by handler pointer identity: a handler
//! reachable through several tiers or several category names is yielded
//! once, at its first (most specific) position.

use crate::table::{DispatchTable, Slot};
use polyvis_core::{Capability, Category, SharedHandler, Structural, Token};
use std::collections::HashSet;

/// Pointer identity of a shared handler, used for deduplication.
fn handler_id<T: 'static, A: 'static, R: 'static>(handler: &SharedHandler<T, A, R>) -> usize {
    std::sync::Arc::as_ptr(handler) as *const () as usize
}

struct Candidates<'t, T: 'static, A: 'static, R: 'static> {
    seen: HashSet<usize>,
    slots: Vec<&'t Slot<T, A, R>>,
}

impl<'t, T: 'static, A: 'static, R: 'static> Candidates<'t, T, A, R> {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            slots: Vec::new(),
        }
    }

    fn add(&mut self, slot: &'t Slot<T, A, R>) {
        if self.seen.insert(handler_id(slot.handler())) {
            self.slots.push(slot);
        }
    }

    fn lookup(&mut self, table: &'t DispatchTable<T, A, R>, name: &str) {
        if let Some(slot) = table.lookup(name) {
            self.add(slot);
        }
    }
}

/// Resolve a token to its ordered, deduplicated candidate slots.
///
/// An empty result is the no-handler-found condition; the caller turns it
/// into the no-match error.
pub fn resolve<'t, T, A, R>(token: &T, table: &'t DispatchTable<T, A, R>) -> Vec<&'t Slot<T, A, R>>
where
    T: Token + 'static,
    A: 'static,
    R: 'static,
{
    let mut candidates = Candidates::new();

    // Ancestry, most specific first.
    for name in token.ancestry() {
        candidates.lookup(table, name);
    }

    // Builtin type name.
    if let Some(name) = token.builtin_name() {
        candidates.lookup(table, name);
    }

    // Structural categories, then capability categories, each in the
    // declaration order of its ALL table.
    for structural in Structural::ALL {
        category_candidates(token, Category::Structural(*structural), table, &mut candidates);
    }
    for capability in Capability::ALL {
        category_candidates(token, Category::Capability(*capability), table, &mut candidates);
    }

    candidates.slots
}

fn category_candidates<'t, T, A, R>(
    token: &T,
    category: Category,
    table: &'t DispatchTable<T, A, R>,
    candidates: &mut Candidates<'t, T, A, R>,
) where
    T: Token + 'static,
    A: 'static,
    R: 'static,
{
    if !token.satisfies(category) {
        return;
    }
    candidates.lookup(table, category.name());
    if let Some(backing) = token.backing_type(category) {
        if backing != category.name() {
            candidates.lookup(table, backing);
        }
    }
}
