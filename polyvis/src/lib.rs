//! # polyvis - Prioritized Visitor Dispatch
//!
//! `polyvis` routes a **token** (the value being visited) to the handler
//! registered for its type, falling back through progressively broader
//! tiers when no exact match exists: ancestry chain, builtin type alias,
//! structural categories, capability categories. A second dispatcher keys
//! handlers by the exact argument *signature* instead of the token type.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use polyvis::{CallArgs, Emission, Flow, TypenameDispatcher};
//!
//! let dispatcher = TypenameDispatcher::builder()
//!     .name("renderer")
//!     .register("int", |n: &i64, _: &CallArgs<()>| -> Flow<String> {
//!         Ok(Emission::one(format!("int: {n}")))
//!     })
//!     .build();
//!
//! let rendered = dispatcher.dispatch(&3, &CallArgs::new())?;
//! ```
//!
//! Handlers registered under a category name (`"Iterable"`, `"Mapping"`,
//! ...) catch every token declaring that capability. In multi mode the
//! dispatcher runs every matching handler and flattens their emissions
//! into one lazy stream.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use polyvis_core::{
    // Invocation
    CallArgs,
    // Categories
    Capability,
    Category,
    // Errors
    DispatchError,
    // Handler output
    Emission,
    Flow,
    // Handler
    Handler,
    ImplementationError,
    Interrupt,
    InvocationCodec,
    SharedHandler,
    Structural,
    StructuralCodec,
    // Token
    Token,
};

// Dispatchers
pub use polyvis_std::{
    signature::{SharedSignatureHandler, SignatureDispatcher, SignatureStream},
    typename::{
        DispatchStream, Prepare, RegistryPrepare, TypenameDispatcher, TypenameDispatcherBuilder,
    },
};

// Building blocks, for callers composing their own dispatch layer.
pub use polyvis_std::{
    cache::BuildOnce,
    registry::{DEFAULT_METHOD_PREFIX, Registration, Registry},
    resolver::resolve,
    table::{DispatchTable, Slot},
};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use polyvis_std::testing::*;
}

/// Prelude module - common imports for Polyvis.
///
/// # Usage
///
/// ```rust,ignore
/// use polyvis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Invocation
        CallArgs,
        // Categories
        Capability,
        Category,
        // Errors
        DispatchError,
        // Handler output
        Emission,
        Flow,
        // Core traits
        Handler,
        Interrupt,
        SignatureDispatcher,
        Structural,
        Token,
        // Dispatchers
        TypenameDispatcher,
    };
}
