//! Testing utilities for Polyvis.
//!
//! Handler doubles for exercising dispatchers without real business logic:
//!
//! - [`RecordingHandler`]: records every token it sees, returns a fixed value
//! - [`CountingHandler`]: counts invocations
//! - [`EmittingHandler`]: a multi-value producer with a fixed yield sequence
//! - [`InterruptingHandler`]: always signals the voluntary stop
//!
//! All doubles are cheaply cloneable and share their recorded state across
//! clones, so a test can keep one clone and register the other.

use polyvis_core::{CallArgs, Emission, Flow, Handler, Interrupt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records every token it receives and returns a fixed value.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::returning("int result");
/// let probe = recorder.clone();
///
/// dispatcher.register("int", recorder);
/// dispatcher.dispatch(&token, &CallArgs::new())?;
///
/// assert_eq!(probe.count(), 1);
/// ```
pub struct RecordingHandler<T, R> {
    tokens: Arc<Mutex<Vec<T>>>,
    result: R,
}

impl<T, R> RecordingHandler<T, R> {
    /// A recorder that returns a clone of `result` on every call.
    pub fn returning(result: R) -> Self {
        Self {
            tokens: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// A clone of the recorded tokens, in call order.
    pub fn tokens(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.tokens.lock().unwrap().clone()
    }

    /// The number of recorded calls.
    pub fn count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

impl<T, R: Clone> Clone for RecordingHandler<T, R> {
    fn clone(&self) -> Self {
        Self {
            tokens: self.tokens.clone(),
            result: self.result.clone(),
        }
    }
}

impl<T, A, R> Handler<T, A> for RecordingHandler<T, R>
where
    T: Clone + Send,
    R: Clone + Send + Sync,
{
    type Output = R;

    fn call(&self, token: &T, _args: &CallArgs<A>) -> Flow<R> {
        self.tokens.lock().unwrap().push(token.clone());
        Ok(Emission::one(self.result.clone()))
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and emits nothing of substance.
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// A fresh counter at zero.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<T, A> Handler<T, A> for CountingHandler {
    type Output = ();

    fn call(&self, _token: &T, _args: &CallArgs<A>) -> Flow<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(Emission::one(()))
    }
}

// ============================================================================
// Emitting Handler
// ============================================================================

/// A multi-value producer: emits a fixed sequence of values on every call.
///
/// Useful for asserting that the engine flattens multi-value emissions
/// element by element, in yield order.
pub struct EmittingHandler<R> {
    values: Vec<R>,
}

impl<R> EmittingHandler<R> {
    /// A producer that emits `values` in order on every call.
    pub fn new(values: impl IntoIterator<Item = R>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl<T, A, R> Handler<T, A> for EmittingHandler<R>
where
    R: Clone + Send + Sync + 'static,
{
    type Output = R;

    fn call(&self, _token: &T, _args: &CallArgs<A>) -> Flow<R> {
        Ok(Emission::many(self.values.clone().into_iter()))
    }
}

// ============================================================================
// Interrupting Handler
// ============================================================================

/// A handler that always signals the voluntary stop.
pub struct InterruptingHandler;

impl<T, A> Handler<T, A> for InterruptingHandler {
    type Output = ();

    fn call(&self, _token: &T, _args: &CallArgs<A>) -> Flow<()> {
        Err(Interrupt)
    }
}

#[cfg(test)]
mod tests {
    use super::{CountingHandler, EmittingHandler, RecordingHandler};
    use polyvis_core::{CallArgs, Emission, Handler};

    #[test]
    fn recorder_shares_state_across_clones() {
        let recorder: RecordingHandler<i64, &'static str> = RecordingHandler::returning("seen");
        let probe = recorder.clone();
        let _ = Handler::<i64, ()>::call(&recorder, &7, &CallArgs::new());
        assert_eq!(probe.count(), 1);
        assert_eq!(probe.tokens(), vec![7]);
    }

    #[test]
    fn counter_accumulates_and_resets() {
        let counter = CountingHandler::new();
        let _ = Handler::<i64, ()>::call(&counter, &1, &CallArgs::new());
        let _ = Handler::<i64, ()>::call(&counter, &2, &CallArgs::new());
        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn emitter_yields_its_sequence() {
        let emitter = EmittingHandler::new(["hooray", "yippee"]);
        match Handler::<i64, ()>::call(&emitter, &0, &CallArgs::new()) {
            Ok(Emission::Many(values)) => {
                assert_eq!(values.collect::<Vec<_>>(), vec!["hooray", "yippee"]);
            }
            other => panic!("unexpected flow: {other:?}"),
        }
    }
}
