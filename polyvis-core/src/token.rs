//! Token identity trait.

use crate::category::Category;
use std::fmt;
use std::sync::Arc;

/// Statically declared type identity for dispatchable values.
///
/// A token is the first argument of a dispatch call; everything the
/// resolver knows about it comes from this trait. Implementations declare
/// a priority list of discriminator names up front instead of relying on
/// runtime reflection:
///
/// 1. [`ancestry`](Token::ancestry) drives the most specific tier: the
///    token's own type name followed by every ancestor name, nearest first.
/// 2. [`builtin_name`](Token::builtin_name) optionally aliases the token to
///    a well-known builtin name (`"int"`, `"list"`, ...).
/// 3. [`satisfies`](Token::satisfies) answers membership in the closed
///    [`Category`] sets for the two lowest-priority tiers.
///
/// The `Debug` supertrait is used when rendering no-match errors, which
/// identify the token that failed to resolve.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Beagle;
///
/// impl Token for Beagle {
///     fn type_name(&self) -> &'static str {
///         "Beagle"
///     }
///
///     fn ancestry(&self) -> Vec<&'static str> {
///         vec!["Beagle", "Dog", "Animal"]
///     }
/// }
/// ```
pub trait Token: fmt::Debug {
    /// The token's concrete type name.
    fn type_name(&self) -> &'static str;

    /// The token's ancestry chain, most specific first.
    ///
    /// Must begin with [`type_name`](Token::type_name). The default is a
    /// chain of one: the type itself, with no ancestors.
    fn ancestry(&self) -> Vec<&'static str> {
        vec![self.type_name()]
    }

    /// A recognized builtin name this token's type coincides with, if any.
    fn builtin_name(&self) -> Option<&'static str> {
        None
    }

    /// Whether this token satisfies the given category structurally.
    fn satisfies(&self, category: Category) -> bool {
        let _ = category;
        false
    }

    /// The concrete type name backing a satisfied category.
    ///
    /// Category-tier candidates are tried under the category's own name and
    /// under this name, so handlers can be keyed by either the abstract
    /// interface or the concrete implementation. Defaults to
    /// [`type_name`](Token::type_name) when the category is satisfied.
    fn backing_type(&self, category: Category) -> Option<&'static str> {
        self.satisfies(category).then(|| self.type_name())
    }
}

// Owned wrappers dispatch as the value they carry.
impl<T: Token> Token for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn ancestry(&self) -> Vec<&'static str> {
        (**self).ancestry()
    }

    fn builtin_name(&self) -> Option<&'static str> {
        (**self).builtin_name()
    }

    fn satisfies(&self, category: Category) -> bool {
        (**self).satisfies(category)
    }

    fn backing_type(&self, category: Category) -> Option<&'static str> {
        (**self).backing_type(category)
    }
}

impl<T: Token> Token for Arc<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn ancestry(&self) -> Vec<&'static str> {
        (**self).ancestry()
    }

    fn builtin_name(&self) -> Option<&'static str> {
        (**self).builtin_name()
    }

    fn satisfies(&self, category: Category) -> bool {
        (**self).satisfies(category)
    }

    fn backing_type(&self, category: Category) -> Option<&'static str> {
        (**self).backing_type(category)
    }
}
