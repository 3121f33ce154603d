//! # polyvis-core
//!
//! Core traits and data types for the Polyvis dispatch engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! extensions that don't need the full `polyvis-std` implementation.
//!
//! # Dispatch Model
//!
//! Polyvis routes a call to one or more handlers based on the runtime type
//! of the call's first argument, the *token*. The pieces defined here:
//!
//! ## Token identity ([`Token`])
//!
//! A token declares its own type name, an ordered ancestry chain (most
//! specific first), an optional builtin alias, and the structural categories
//! it satisfies. All of this is static declaration. There is no reflection
//! anywhere in the engine. Implementations for common std types (integers,
//! `String`, `Vec`, sets, maps) live beside the trait in this crate.
//!
//! ## Categories ([`Structural`], [`Capability`])
//!
//! Two closed, immutable sets of named categories used as fallback tiers
//! when no handler matches the token's ancestry. Each set is tried in its
//! declaration order, which is the deterministic resolution order within
//! that tier.
//!
//! ## Handlers ([`Handler`], [`Emission`], [`Interrupt`])
//!
//! A handler receives the token plus call arguments and produces either a
//! single value or a lazy finite sequence of values ([`Emission`]). It may
//! instead return [`Interrupt`], a voluntary stop signal that ends the
//! dispatch loop without indicating failure.
//!
//! ## Invocation keys ([`CallArgs`], [`InvocationCodec`])
//!
//! A structurally comparable record of positional and keyed arguments, used
//! by signature-keyed dispatchers to match a call against the arguments
//! captured at registration time.
//!
//! # Error Types
//!
//! - [`DispatchError`] - no handler matched, or the dispatcher is misconfigured
//! - [`ImplementationError`] - the dispatch table was referenced while it
//!   was still being built

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod category;
mod error;
mod handler;
mod invocation;
mod token;
mod tokens;

// Re-exports
pub use category::{Capability, Category, Structural};
pub use error::{DispatchError, ImplementationError};
pub use handler::{Emission, Flow, Handler, Interrupt, SharedHandler};
pub use invocation::{CallArgs, InvocationCodec, StructuralCodec};
pub use token::Token;
