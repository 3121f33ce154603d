//! Type-name dispatcher: the resolve-then-invoke engine.
//!
//! [`TypenameDispatcher`] routes a token to handlers registered by name,
//! walking the token's ancestry and the category fallback tiers through
//! [`resolve`]. Each call is atomic: it either produces a result stream
//! (possibly ended early by a handler's [`Interrupt`]) or fails with a
//! single [`DispatchError`]. Nothing is retried.
//!
//! The dispatch table is built lazily on the first call and cached for the
//! dispatcher's lifetime through [`BuildOnce`]. Handlers registered after
//! the first call land in the registry but are never observed by the table;
//! this is a documented limitation, not a bug.
//!
//! [`resolve`]: crate::resolver::resolve
//! [`BuildOnce`]: crate::cache::BuildOnce
//! [`Interrupt`]: polyvis_core::Interrupt

use crate::cache::BuildOnce;
use crate::registry::Registry;
use crate::resolver::resolve;
use crate::table::{DispatchTable, Slot};
use polyvis_core::{CallArgs, DispatchError, Emission, Handler, Interrupt, SharedHandler, Token};

/// Hook for customizing how the dispatch table is built.
///
/// The default implementation builds the table straight from the registry.
/// Custom implementations must read the registry too: calling back into
/// `dispatch` from inside `prepare` touches the table mid-build and fails
/// with an implementation error.
pub trait Prepare<T, A, R>: Send + Sync {
    /// Build the dispatch table for the given dispatcher.
    fn prepare(
        &self,
        dispatcher: &TypenameDispatcher<T, A, R>,
    ) -> Result<DispatchTable<T, A, R>, DispatchError>;
}

/// The default preparer: table built from every registry entry.
pub struct RegistryPrepare;

impl<T, A, R> Prepare<T, A, R> for RegistryPrepare
where
    T: Token + 'static,
    A: Clone + 'static,
    R: 'static,
{
    fn prepare(
        &self,
        dispatcher: &TypenameDispatcher<T, A, R>,
    ) -> Result<DispatchTable<T, A, R>, DispatchError> {
        Ok(DispatchTable::build(dispatcher.registry()))
    }
}

/// A dispatcher routing tokens to name-keyed handlers.
///
/// Built through [`TypenameDispatcher::builder`]. In single mode (the
/// default) a call invokes the first resolved candidate only; in multi mode
/// it invokes every candidate in resolved order.
pub struct TypenameDispatcher<T: 'static, A: 'static, R: 'static> {
    name: String,
    multi: bool,
    registry: Registry<T, A, R>,
    table: BuildOnce<DispatchTable<T, A, R>>,
    preparer: Box<dyn Prepare<T, A, R>>,
}

impl<T, A, R> TypenameDispatcher<T, A, R>
where
    T: Token + 'static,
    A: Clone + 'static,
    R: 'static,
{
    /// Start building a dispatcher.
    pub fn builder() -> TypenameDispatcherBuilder<T, A, R> {
        TypenameDispatcherBuilder::new()
    }

    /// The dispatcher's name, as used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether every matching handler runs, rather than only the first.
    pub fn multi(&self) -> bool {
        self.multi
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry<T, A, R> {
        &self.registry
    }

    /// Whether the dispatch table has been built.
    pub fn is_prepared(&self) -> bool {
        self.table.is_built()
    }

    /// Register a handler under a name.
    ///
    /// Has no effect on dispatch once the table has been built by the
    /// first call; see the module docs.
    pub fn register<H>(&mut self, name: &str, handler: H)
    where
        H: Handler<T, A, Output = R> + 'static,
    {
        self.registry.register(name, handler);
    }

    /// Register a handler with an extras payload.
    pub fn register_with_extras<H>(&mut self, name: &str, handler: H, extras: CallArgs<A>)
    where
        H: Handler<T, A, Output = R> + 'static,
    {
        self.registry.register_with_extras(name, handler, extras);
    }

    /// Register an already shared handler under a name.
    pub fn register_shared(&mut self, name: &str, handler: SharedHandler<T, A, R>) {
        self.registry.register_shared(name, handler);
    }

    fn table(&self) -> Result<&DispatchTable<T, A, R>, DispatchError> {
        self.table
            .get_or_try_build(&self.name, || self.preparer.prepare(self))
    }

    /// Resolve the token and return the lazy, flattened result stream.
    ///
    /// Resolution happens eagerly, so an empty candidate set fails here
    /// with the no-match error. Handler invocation is lazy: each candidate
    /// runs only as the stream is consumed, and dropping the stream early
    /// cancels the remaining invocations.
    pub fn dispatch_all<'d>(
        &'d self,
        token: &'d T,
        rest: &CallArgs<A>,
    ) -> Result<DispatchStream<'d, T, A, R>, DispatchError> {
        let table = self.table()?;
        let candidates = resolve(token, table);
        if candidates.is_empty() {
            return Err(DispatchError::NoMatch {
                token: format!("{token:?}"),
                dispatcher: self.name.clone(),
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            dispatcher = %self.name,
            token = token.type_name(),
            candidates = candidates.len(),
            multi = self.multi,
            "resolved dispatch candidates"
        );
        Ok(DispatchStream {
            token,
            rest: rest.clone(),
            candidates: candidates.into_iter(),
            current: None,
            invoked: 0,
            multi: self.multi,
            done: false,
            #[cfg(feature = "tracing")]
            dispatcher: &self.name,
        })
    }

    /// Dispatch and return the first flattened result.
    ///
    /// `Ok(None)` means the first candidate interrupted (or emitted an
    /// empty sequence) before producing a value.
    pub fn dispatch(&self, token: &T, rest: &CallArgs<A>) -> Result<Option<R>, DispatchError> {
        let mut stream = self.dispatch_all(token, rest)?;
        Ok(stream.next())
    }
}

/// Builder for [`TypenameDispatcher`].
pub struct TypenameDispatcherBuilder<T: 'static, A: 'static, R: 'static> {
    name: String,
    multi: bool,
    registry: Registry<T, A, R>,
    preparer: Option<Box<dyn Prepare<T, A, R>>>,
}

impl<T, A, R> TypenameDispatcherBuilder<T, A, R>
where
    T: Token + 'static,
    A: Clone + 'static,
    R: 'static,
{
    /// A builder with the default configuration: single mode, the
    /// `"handle_"` method prefix, and the registry-based preparer.
    pub fn new() -> Self {
        Self {
            name: "typename-dispatcher".to_string(),
            multi: false,
            registry: Registry::new(),
            preparer: None,
        }
    }

    /// Name the dispatcher; the name appears in error messages.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Run every matching handler instead of only the first.
    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    /// Set the method prefix stripped from registration names.
    ///
    /// Applies to registrations made after this call.
    pub fn method_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.registry.set_prefix(prefix);
        self
    }

    /// Register a handler under a name.
    pub fn register<H>(mut self, name: &str, handler: H) -> Self
    where
        H: Handler<T, A, Output = R> + 'static,
    {
        self.registry.register(name, handler);
        self
    }

    /// Register a handler with an extras payload.
    pub fn register_with_extras<H>(mut self, name: &str, handler: H, extras: CallArgs<A>) -> Self
    where
        H: Handler<T, A, Output = R> + 'static,
    {
        self.registry.register_with_extras(name, handler, extras);
        self
    }

    /// Register an already shared handler under a name.
    pub fn register_shared(mut self, name: &str, handler: SharedHandler<T, A, R>) -> Self {
        self.registry.register_shared(name, handler);
        self
    }

    /// Replace the table preparer.
    pub fn prepare_with<P>(mut self, preparer: P) -> Self
    where
        P: Prepare<T, A, R> + 'static,
    {
        self.preparer = Some(Box::new(preparer));
        self
    }

    /// Finish the builder.
    pub fn build(self) -> TypenameDispatcher<T, A, R> {
        TypenameDispatcher {
            name: self.name,
            multi: self.multi,
            registry: self.registry,
            table: BuildOnce::new(),
            preparer: self.preparer.unwrap_or_else(|| Box::new(RegistryPrepare)),
        }
    }
}

impl<T, A, R> Default for TypenameDispatcherBuilder<T, A, R>
where
    T: Token + 'static,
    A: Clone + 'static,
    R: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy, flattened dispatch output.
///
/// Yields each handler result as one element, expanding multi-value
/// emissions in the handler's own yield order. Dropping the stream early is
/// the cancellation path; no resources are held beyond the borrow of the
/// dispatcher and token. The call arguments are captured by value, so the
/// stream outlives the expression that supplied them.
pub struct DispatchStream<'d, T: 'static, A: 'static, R: 'static> {
    token: &'d T,
    rest: CallArgs<A>,
    candidates: std::vec::IntoIter<&'d Slot<T, A, R>>,
    current: Option<Box<dyn Iterator<Item = R> + Send>>,
    invoked: usize,
    multi: bool,
    done: bool,
    #[cfg(feature = "tracing")]
    dispatcher: &'d str,
}

impl<'d, T, A, R> Iterator for DispatchStream<'d, T, A, R>
where
    A: Clone + 'static,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some(value) = current.next() {
                    return Some(value);
                }
                self.current = None;
            }
            if self.done {
                return None;
            }
            // Single mode stops after the first candidate's emission is
            // drained, even when more candidates matched.
            if self.invoked > 0 && !self.multi {
                self.done = true;
                return None;
            }
            let Some(slot) = self.candidates.next() else {
                self.done = true;
                return None;
            };
            self.invoked += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                dispatcher = %self.dispatcher,
                candidate = self.invoked,
                "invoking handler"
            );
            let merged = slot.extras().merge(&self.rest);
            match slot.handler().call(self.token, &merged) {
                Ok(Emission::One(value)) => return Some(value),
                Ok(Emission::Many(values)) => self.current = Some(values),
                Err(Interrupt) => {
                    // Voluntary stop: end the stream as a success.
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
