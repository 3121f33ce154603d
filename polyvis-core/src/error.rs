//! Error types for Polyvis.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DispatchError`] - Top-level error type for dispatch operations
//! - [`ImplementationError`] - Misuse of the build-once dispatch table
//!
//! Note that [`Interrupt`] is deliberately *not* part of this hierarchy.
//! It is a control signal handlers use to stop the dispatch loop early and
//! is swallowed at the loop boundary, never surfacing to callers as failure.
//!
//! [`Interrupt`]: crate::Interrupt

use thiserror::Error;

/// Errors that can occur during dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Resolution exhausted every tier without producing a candidate.
    #[error("no handler was found for {token} on `{dispatcher}`")]
    NoMatch {
        /// Debug rendering of the token that failed to match.
        token: String,
        /// Name of the dispatcher that performed the resolution.
        dispatcher: String,
    },

    /// The dispatcher is configured incorrectly.
    #[error(transparent)]
    Implementation(#[from] ImplementationError),
}

/// Raised when a dispatcher observes its own dispatch table while that
/// table is still being built.
///
/// This happens when a custom [`Prepare`] implementation calls back into
/// `dispatch` instead of reading the registry. It indicates a defect in the
/// dispatcher configuration and is never silently ignored.
///
/// [`Prepare`]: https://docs.rs/polyvis-std
#[derive(Error, Debug)]
#[error(
    "the dispatch table for `{dispatcher}` was referenced while it was still \
     being built; prepare implementations must read the registry, not the table"
)]
pub struct ImplementationError {
    /// Name of the dispatcher whose table build re-entered itself.
    pub dispatcher: String,
}

impl ImplementationError {
    /// A table build that re-entered itself on the named dispatcher.
    pub fn recursive_build(dispatcher: impl Into<String>) -> Self {
        Self {
            dispatcher: dispatcher.into(),
        }
    }
}
