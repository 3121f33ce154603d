//! # polyvis-std
//!
//! Standard implementations for the Polyvis dispatch engine.
//!
//! This crate provides:
//! - **Registration**: [`Registry`], append-only with prefix normalization
//! - **Resolution**: [`resolve`], the four-tier candidate generator
//! - **Dispatchers**: [`TypenameDispatcher`] and [`SignatureDispatcher`]
//! - **Build-once cache**: [`BuildOnce`], the memoizing collaborator
//! - **Testing utilities**: handler doubles for tests
//!
//! [`Registry`]: registry::Registry
//! [`resolve`]: resolver::resolve
//! [`TypenameDispatcher`]: typename::TypenameDispatcher
//! [`SignatureDispatcher`]: signature::SignatureDispatcher
//! [`BuildOnce`]: cache::BuildOnce

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use polyvis_core;

// Modules
pub mod cache;
pub mod registry;
pub mod resolver;
pub mod signature;
pub mod table;
pub mod testing;
pub mod typename;
