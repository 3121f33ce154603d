//! Dispatch table built from the registry.

use crate::registry::Registry;
use polyvis_core::{CallArgs, SharedHandler};
use std::collections::HashMap;

/// A handler slot: the handler plus its registration extras.
pub struct Slot<T: 'static, A: 'static, R: 'static> {
    handler: SharedHandler<T, A, R>,
    extras: CallArgs<A>,
}

impl<T: 'static, A: 'static, R: 'static> Slot<T, A, R> {
    /// The handler stored in this slot.
    pub fn handler(&self) -> &SharedHandler<T, A, R> {
        &self.handler
    }

    /// The registration extras stored in this slot.
    pub fn extras(&self) -> &CallArgs<A> {
        &self.extras
    }
}

/// Name-to-handler lookup structure, built exactly once per dispatcher.
///
/// Built from the registry in registration order, so when two registrations
/// share a key the later one shadows the earlier one. The table is never
/// mutated after the build; registrations appended afterwards have no
/// effect on it.
pub struct DispatchTable<T: 'static, A: 'static, R: 'static> {
    slots: HashMap<String, Slot<T, A, R>>,
}

impl<T: 'static, A: 'static, R: 'static> DispatchTable<T, A, R> {
    /// Build a table from every entry in the registry.
    pub fn build(registry: &Registry<T, A, R>) -> Self
    where
        A: Clone,
    {
        let mut slots = HashMap::with_capacity(registry.len());
        for entry in registry.entries() {
            // Later registrations shadow earlier ones on the same key.
            slots.insert(
                entry.name().to_string(),
                Slot {
                    handler: entry.handler().clone(),
                    extras: entry.extras().clone(),
                },
            );
        }
        Self { slots }
    }

    /// Look up the slot registered under a name.
    pub fn lookup(&self, name: &str) -> Option<&Slot<T, A, R>> {
        self.slots.get(name)
    }

    /// The number of distinct keys in the table.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
