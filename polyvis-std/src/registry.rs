//! Append-only handler registry.
//!
//! A [`Registry`] accumulates (name, handler) registrations in order.
//! Names are normalized on the way in: a name carrying the configured
//! method prefix (default `"handle_"`) has the prefix stripped, so
//! `register("handle_int", h)` and `register("int", h)` target the same
//! key. Registration binds a discriminator to a handler explicitly; there
//! is no member scanning.
//!
//! Registrations optionally carry an extras payload: positional and keyed
//! arguments captured at registration time, merged with call-time arguments
//! when the handler is applied.

use polyvis_core::{CallArgs, Handler, SharedHandler};
use std::sync::Arc;

/// The default method prefix stripped from registration names.
pub const DEFAULT_METHOD_PREFIX: &str = "handle_";

/// A single registration: a normalized name, a handler, and its extras.
pub struct Registration<T: 'static, A: 'static, R: 'static> {
    name: String,
    handler: SharedHandler<T, A, R>,
    extras: CallArgs<A>,
}

impl<T: 'static, A: 'static, R: 'static> Registration<T, A, R> {
    /// The normalized registration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The registered handler.
    pub fn handler(&self) -> &SharedHandler<T, A, R> {
        &self.handler
    }

    /// The extras payload captured at registration time.
    pub fn extras(&self) -> &CallArgs<A> {
        &self.extras
    }
}

/// An append-only ordered list of handler registrations.
pub struct Registry<T: 'static, A: 'static, R: 'static> {
    entries: Vec<Registration<T, A, R>>,
    prefix: String,
}

impl<T: 'static, A: 'static, R: 'static> Registry<T, A, R> {
    /// An empty registry with the default method prefix.
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_METHOD_PREFIX)
    }

    /// An empty registry with a custom method prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            prefix: prefix.into(),
        }
    }

    /// The configured method prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Replace the method prefix. Affects subsequent registrations only.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    /// Register a handler under a name, with no extras.
    pub fn register<H>(&mut self, name: &str, handler: H)
    where
        H: Handler<T, A, Output = R> + 'static,
    {
        self.register_shared(name, Arc::new(handler));
    }

    /// Register a handler under a name with an extras payload.
    pub fn register_with_extras<H>(&mut self, name: &str, handler: H, extras: CallArgs<A>)
    where
        H: Handler<T, A, Output = R> + 'static,
    {
        self.register_shared_with_extras(name, Arc::new(handler), extras);
    }

    /// Register an already shared handler under a name.
    ///
    /// Sharing one handler across several names is how a handler matches
    /// multiple categories while still being deduplicated per dispatch.
    pub fn register_shared(&mut self, name: &str, handler: SharedHandler<T, A, R>) {
        self.register_shared_with_extras(name, handler, CallArgs::new());
    }

    /// Register an already shared handler with an extras payload.
    pub fn register_shared_with_extras(
        &mut self,
        name: &str,
        handler: SharedHandler<T, A, R>,
        extras: CallArgs<A>,
    ) {
        self.entries.push(Registration {
            name: self.normalize(name),
            handler,
            extras,
        });
    }

    /// The registrations, in registration order.
    pub fn entries(&self) -> &[Registration<T, A, R>] {
        &self.entries
    }

    /// The number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handlers have been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&self, name: &str) -> String {
        name.strip_prefix(&self.prefix).unwrap_or(name).to_string()
    }
}

impl<T: 'static, A: 'static, R: 'static> Default for Registry<T, A, R> {
    fn default() -> Self {
        Self::new()
    }
}
