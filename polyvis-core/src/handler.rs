//! Handler trait and handler output model.
//!
//! A handler is the unit of work dispatch resolves to. Its output is an
//! [`Emission`]: one value, or a lazy finite sequence whose elements are
//! flattened individually into the caller's result stream. A handler can
//! also return [`Interrupt`] to stop the dispatch loop early; the engine
//! swallows the signal and treats the call as a normal success.

use crate::invocation::CallArgs;
use std::fmt;
use std::sync::Arc;

/// Voluntary stop signal from a handler.
///
/// Returned as the `Err` side of [`Flow`] so that `?` reads naturally in
/// handler bodies, but it is a control signal, not a failure: the dispatch
/// loop converts it into a normal end of the result stream and it never
/// surfaces to the caller as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupt;

/// A handler's output: one value, or a lazy finite sequence of values.
///
/// The dispatch engine flattens `Many` emissions element by element, in the
/// handler's own yield order, into the overall result stream.
pub enum Emission<R> {
    /// A single value, contributed as one element.
    One(R),
    /// A lazy finite sequence, each element contributed individually.
    Many(Box<dyn Iterator<Item = R> + Send>),
}

impl<R> Emission<R> {
    /// A single-value emission.
    pub fn one(value: R) -> Self {
        Emission::One(value)
    }

    /// A multi-value emission from any finite iterator.
    pub fn many<I>(values: I) -> Self
    where
        I: IntoIterator<Item = R>,
        I::IntoIter: Send + 'static,
    {
        Emission::Many(Box::new(values.into_iter()))
    }
}

impl<R: fmt::Debug> fmt::Debug for Emission<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emission::One(v) => f.debug_tuple("One").field(v).finish(),
            Emission::Many(_) => f.write_str("Many(..)"),
        }
    }
}

/// What a handler invocation produces: an emission, or the stop signal.
pub type Flow<R> = Result<Emission<R>, Interrupt>;

/// A registered callable that processes tokens matching some criterion.
///
/// Implemented automatically for closures of the matching shape, so plain
/// functions register directly:
///
/// ```rust,ignore
/// dispatcher.register("int", |token: &Value, _: &CallArgs<()>| {
///     Ok(Emission::one(format!("saw {token:?}")))
/// });
/// ```
///
/// Handlers own no external resources; a consumer that stops reading the
/// result stream early simply drops it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle tokens of type `{T}`",
    label = "missing `Handler` implementation",
    note = "Handlers are `Fn(&{T}, &CallArgs<{A}>) -> Flow<R>` or explicit `Handler` impls."
)]
pub trait Handler<T, A>: Send + Sync {
    /// The element type of this handler's emissions.
    type Output;

    /// Process the token, with any extra call arguments.
    fn call(&self, token: &T, args: &CallArgs<A>) -> Flow<Self::Output>;
}

impl<T, A, R, F> Handler<T, A> for F
where
    F: Fn(&T, &CallArgs<A>) -> Flow<R> + Send + Sync,
{
    type Output = R;

    fn call(&self, token: &T, args: &CallArgs<A>) -> Flow<R> {
        self(token, args)
    }
}

/// A reference-counted handler, shareable across several registration keys.
///
/// Deduplication during resolution is by pointer identity, so registering
/// one `SharedHandler` under multiple names still invokes it at most once
/// per dispatch call.
pub type SharedHandler<T, A, R> = Arc<dyn Handler<T, A, Output = R>>;
